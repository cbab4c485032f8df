//! Typed error handling for the hotel listing service
//!
//! Every failure a request can hit is a [`HotelError`] variant. The HTTP
//! boundary turns it into a response through an [`ErrorMapping`], which
//! decides whether each kind keeps its own status code (`Strict`) or is
//! collapsed to `404 {}` the way existing clients expect (`Legacy`).
//!
//! # Example
//!
//! ```rust,ignore
//! use hotels::prelude::*;
//!
//! match service.list_hotels(user_id).await {
//!     Ok(hotels) => println!("{} hotels", hotels.len()),
//!     Err(HotelError::Conflict { reason: ConflictReason::PaymentNotConcluded }) => {
//!         println!("ticket not paid yet");
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource that a lookup expected to find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Enrollment,
    Ticket,
    TicketType,
    Hotels,
    Hotel,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Enrollment => "enrollment",
            Resource::Ticket => "ticket",
            Resource::TicketType => "ticket type",
            Resource::Hotels => "hotel list",
            Resource::Hotel => "hotel",
        };
        f.write_str(name)
    }
}

/// Why an enrolled user may not see hotel data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    /// Remote event, or a ticket tier without lodging
    NonStayEvent,
    /// No payment recorded for the ticket
    PaymentNotConcluded,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictReason::NonStayEvent => f.write_str("non-stay event"),
            ConflictReason::PaymentNotConcluded => f.write_str("payment not concluded"),
        }
    }
}

/// The error type for every hotel listing operation
#[derive(Debug, thiserror::Error)]
pub enum HotelError {
    /// No usable credential or no session behind it
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// A required record is missing
    #[error("{resource} not found")]
    NotFound { resource: Resource },

    /// The user is enrolled but not entitled to lodging data
    #[error("Conflict: {reason}")]
    Conflict { reason: ConflictReason },

    /// Route parameter is not a positive integer
    #[error("Invalid hotel id: '{value}'")]
    InvalidHotelId { value: String },

    /// Persistence layer failure
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl HotelError {
    pub fn not_found(resource: Resource) -> Self {
        HotelError::NotFound { resource }
    }

    pub fn conflict(reason: ConflictReason) -> Self {
        HotelError::Conflict { reason }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HotelError::Unauthorized {
            message: message.into(),
        }
    }

    /// Status code when every kind keeps its own meaning
    pub fn status_code(&self) -> StatusCode {
        match self {
            HotelError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            HotelError::NotFound { .. } => StatusCode::NOT_FOUND,
            HotelError::Conflict { .. } => StatusCode::CONFLICT,
            HotelError::InvalidHotelId { .. } => StatusCode::BAD_REQUEST,
            HotelError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            HotelError::Unauthorized { .. } => "UNAUTHORIZED",
            HotelError::NotFound { .. } => "NOT_FOUND",
            HotelError::Conflict {
                reason: ConflictReason::NonStayEvent,
            } => "NON_STAY_EVENT",
            HotelError::Conflict {
                reason: ConflictReason::PaymentNotConcluded,
            } => "PAYMENT_NOT_CONCLUDED",
            HotelError::InvalidHotelId { .. } => "INVALID_HOTEL_ID",
            HotelError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }

    /// Build the HTTP response under the given mapping
    pub fn into_response_with(self, mapping: ErrorMapping) -> Response {
        match &self {
            HotelError::Storage(e) => tracing::error!(error = %e, "storage failure"),
            other => tracing::debug!(code = other.error_code(), "request rejected: {}", other),
        }

        match mapping {
            ErrorMapping::Strict => (self.status_code(), Json(self.to_response())).into_response(),
            ErrorMapping::Legacy => {
                let status = match self {
                    HotelError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
                    _ => StatusCode::NOT_FOUND,
                };
                (status, Json(serde_json::json!({}))).into_response()
            }
        }
    }
}

/// Error response structure for `Strict` mapping
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl IntoResponse for HotelError {
    fn into_response(self) -> Response {
        self.into_response_with(ErrorMapping::default())
    }
}

/// How failures are rendered at the HTTP boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMapping {
    /// 401 / 404 / 409 / 400 / 500 with a `{code, message}` body
    #[default]
    Strict,
    /// Everything but 401 becomes `404 {}`
    Legacy,
}

impl FromStr for ErrorMapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ErrorMapping::Strict),
            "legacy" => Ok(ErrorMapping::Legacy),
            other => Err(format!("unknown error mapping '{}'", other)),
        }
    }
}

/// A specialized Result type for hotel listing operations
pub type HotelResult<T> = Result<T, HotelError>;
