//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes under each mapping
//! - Error responses are properly formatted
//! - Error matching allows callers to handle specific cases

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use hotels::prelude::*;
use serde_json::{Value, json};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn all_errors() -> Vec<HotelError> {
    vec![
        HotelError::unauthorized("missing bearer token"),
        HotelError::not_found(Resource::Enrollment),
        HotelError::not_found(Resource::Ticket),
        HotelError::not_found(Resource::TicketType),
        HotelError::not_found(Resource::Hotels),
        HotelError::not_found(Resource::Hotel),
        HotelError::conflict(ConflictReason::NonStayEvent),
        HotelError::conflict(ConflictReason::PaymentNotConcluded),
        HotelError::InvalidHotelId {
            value: "abc".to_string(),
        },
        HotelError::from(anyhow::anyhow!("connection reset")),
    ]
}

// =============================================================================
// Strict mapping
// =============================================================================

mod strict_mapping_tests {
    use super::*;

    #[tokio::test]
    async fn test_strict_body_has_code_and_message() {
        let response = HotelError::conflict(ConflictReason::PaymentNotConcluded)
            .into_response_with(ErrorMapping::Strict);
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await,
            json!({
                "code": "PAYMENT_NOT_CONCLUDED",
                "message": "Conflict: payment not concluded",
            })
        );
    }

    #[tokio::test]
    async fn test_into_response_uses_strict() {
        let response = HotelError::not_found(Resource::Hotel).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[test]
    fn test_every_kind_keeps_its_status() {
        let statuses: Vec<StatusCode> = all_errors().iter().map(|e| e.status_code()).collect();
        assert_eq!(
            statuses,
            vec![
                StatusCode::UNAUTHORIZED,
                StatusCode::NOT_FOUND,
                StatusCode::NOT_FOUND,
                StatusCode::NOT_FOUND,
                StatusCode::NOT_FOUND,
                StatusCode::NOT_FOUND,
                StatusCode::CONFLICT,
                StatusCode::CONFLICT,
                StatusCode::BAD_REQUEST,
                StatusCode::INTERNAL_SERVER_ERROR,
            ]
        );
    }

    #[test]
    fn test_storage_message_includes_cause() {
        let err = HotelError::from(anyhow::anyhow!("connection reset"));
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(err.to_string().contains("connection reset"));
    }
}

// =============================================================================
// Legacy mapping
// =============================================================================

mod legacy_mapping_tests {
    use super::*;

    #[tokio::test]
    async fn test_everything_but_unauthorized_is_empty_404() {
        for err in all_errors() {
            let unauthorized = matches!(err, HotelError::Unauthorized { .. });
            let response = err.into_response_with(ErrorMapping::Legacy);

            let expected = if unauthorized {
                StatusCode::UNAUTHORIZED
            } else {
                StatusCode::NOT_FOUND
            };
            assert_eq!(response.status(), expected);
            assert_eq!(body_json(response).await, json!({}));
        }
    }
}

// =============================================================================
// Error matching
// =============================================================================

mod error_matching_tests {
    use super::*;

    fn describe(err: &HotelError) -> &'static str {
        match err {
            HotelError::Conflict {
                reason: ConflictReason::PaymentNotConcluded,
            } => "pay first",
            HotelError::Conflict { .. } => "no lodging",
            HotelError::NotFound {
                resource: Resource::Enrollment,
            } => "enroll first",
            _ => "other",
        }
    }

    #[test]
    fn test_callers_can_match_reasons() {
        assert_eq!(
            describe(&HotelError::conflict(ConflictReason::PaymentNotConcluded)),
            "pay first"
        );
        assert_eq!(
            describe(&HotelError::conflict(ConflictReason::NonStayEvent)),
            "no lodging"
        );
        assert_eq!(
            describe(&HotelError::not_found(Resource::Enrollment)),
            "enroll first"
        );
        assert_eq!(describe(&HotelError::not_found(Resource::Hotel)), "other");
    }

    #[test]
    fn test_mapping_deserializes_from_config_names() {
        let mapping: ErrorMapping = serde_json::from_value(json!("legacy")).unwrap();
        assert_eq!(mapping, ErrorMapping::Legacy);
        assert!(serde_json::from_value::<ErrorMapping>(json!("Legacy")).is_err());
    }
}
