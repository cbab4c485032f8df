//! Request-level test macro for storage backends.
//!
//! The `hotel_api_tests!` macro generates HTTP tests that drive a store
//! through the full stack:
//! seed → store → ServerBuilder router → axum_test::TestServer → JSON.

/// Generate the hotel API suite for a storage backend.
///
/// `$make_store` must name an `async fn(SeedData) -> Arc<S>` where
/// `S: HotelStore + 'static`.
///
/// # Generated Tests
///
/// ## Authentication
/// - missing header, unknown token, wrong scheme → 401 in both mappings
///
/// ## Eligibility
/// - no enrollment / no ticket → 404
/// - remote ticket, ticket without lodging, unpaid ticket → 409 strict, `404 {}` legacy
///
/// ## Listings
/// - hotel list (filled and empty), hotel with rooms, hotel without rooms
/// - unknown hotel → 404, bad hotel id → 400 strict / 404 legacy
#[macro_export]
macro_rules! hotel_api_tests {
    ($make_store:path) => {
        mod hotel_api_tests {
            use super::*;
            use axum::http::header::AUTHORIZATION;
            use axum::http::{HeaderValue, StatusCode};
            use axum_test::TestServer;
            use hotels::prelude::*;
            use serde_json::{Value, json};

            async fn make_server(seed: SeedData, mapping: ErrorMapping) -> TestServer {
                let store = $make_store(seed).await;
                let router = ServerBuilder::new()
                    .with_store(store)
                    .with_error_mapping(mapping)
                    .build()
                    .unwrap();
                TestServer::try_new(router).unwrap()
            }

            fn bearer(token: &str) -> HeaderValue {
                HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
            }

            fn eligible() -> SeedData {
                Attendee::eligible().seed()
            }

            // ==============================================================
            // Authentication
            // ==============================================================

            #[tokio::test]
            async fn test_missing_token_is_401() {
                let server = make_server(eligible(), ErrorMapping::Strict).await;

                for path in ["/hotels", "/hotels/1"] {
                    let response = server.get(path).await;
                    response.assert_status(StatusCode::UNAUTHORIZED);
                    let body: Value = response.json();
                    assert_eq!(body["code"], "UNAUTHORIZED");
                }
            }

            #[tokio::test]
            async fn test_unknown_token_is_401() {
                let server = make_server(eligible(), ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels")
                    .add_header(AUTHORIZATION, bearer("no-such-session"))
                    .await;
                response.assert_status(StatusCode::UNAUTHORIZED);
            }

            #[tokio::test]
            async fn test_wrong_scheme_is_401() {
                let server = make_server(eligible(), ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels")
                    .add_header(AUTHORIZATION, HeaderValue::from_static("Token attendee-token"))
                    .await;
                response.assert_status(StatusCode::UNAUTHORIZED);
            }

            #[tokio::test]
            async fn test_legacy_keeps_401_with_empty_body() {
                let server = make_server(eligible(), ErrorMapping::Legacy).await;

                let response = server.get("/hotels").await;
                response.assert_status(StatusCode::UNAUTHORIZED);
                response.assert_json(&json!({}));
            }

            // ==============================================================
            // Eligibility
            // ==============================================================

            #[tokio::test]
            async fn test_user_without_enrollment_is_404() {
                let server = make_server(eligible(), ErrorMapping::Strict).await;

                for path in ["/hotels", "/hotels/1"] {
                    let response = server
                        .get(path)
                        .add_header(AUTHORIZATION, bearer(STRANGER_TOKEN))
                        .await;
                    response.assert_status(StatusCode::NOT_FOUND);
                    let body: Value = response.json();
                    assert_eq!(body["message"], "enrollment not found");
                }
            }

            #[tokio::test]
            async fn test_enrollment_without_ticket_is_404() {
                let server = make_server(Attendee::without_ticket().seed(), ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels")
                    .add_header(AUTHORIZATION, bearer(TOKEN))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["message"], "ticket not found");
            }

            #[tokio::test]
            async fn test_remote_ticket_is_conflict() {
                let server = make_server(Attendee::remote().seed(), ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels")
                    .add_header(AUTHORIZATION, bearer(TOKEN))
                    .await;
                response.assert_status(StatusCode::CONFLICT);
                let body: Value = response.json();
                assert_eq!(body["code"], "NON_STAY_EVENT");
            }

            #[tokio::test]
            async fn test_ticket_without_hotel_is_conflict() {
                let server = make_server(Attendee::without_hotel().seed(), ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels/1")
                    .add_header(AUTHORIZATION, bearer(TOKEN))
                    .await;
                response.assert_status(StatusCode::CONFLICT);
                let body: Value = response.json();
                assert_eq!(body["code"], "NON_STAY_EVENT");
            }

            #[tokio::test]
            async fn test_unpaid_ticket_is_conflict() {
                let server = make_server(Attendee::unpaid().seed(), ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels")
                    .add_header(AUTHORIZATION, bearer(TOKEN))
                    .await;
                response.assert_status(StatusCode::CONFLICT);
                let body: Value = response.json();
                assert_eq!(body["code"], "PAYMENT_NOT_CONCLUDED");
            }

            #[tokio::test]
            async fn test_legacy_collapses_conflicts_to_404() {
                for attendee in [Attendee::remote(), Attendee::without_hotel(), Attendee::unpaid()] {
                    let server = make_server(attendee.seed(), ErrorMapping::Legacy).await;

                    let response = server
                        .get("/hotels")
                        .add_header(AUTHORIZATION, bearer(TOKEN))
                        .await;
                    response.assert_status(StatusCode::NOT_FOUND);
                    response.assert_json(&json!({}));
                }
            }

            #[tokio::test]
            async fn test_gate_runs_before_hotel_lookup() {
                let server = make_server(Attendee::unpaid().seed(), ErrorMapping::Strict).await;

                // hotel 100 does not exist, but the gate fails first
                let response = server
                    .get("/hotels/100")
                    .add_header(AUTHORIZATION, bearer(TOKEN))
                    .await;
                response.assert_status(StatusCode::CONFLICT);
            }

            // ==============================================================
            // Listings
            // ==============================================================

            #[tokio::test]
            async fn test_list_hotels() {
                let mut seed = eligible();
                add_hotel(&mut seed, 1, "Driven Resort", &[]);
                add_hotel(&mut seed, 2, "Driven Palace", &[]);
                let server = make_server(seed, ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels")
                    .add_header(AUTHORIZATION, bearer(TOKEN))
                    .await;
                response.assert_status_ok();
                response.assert_json(&json!([
                    {
                        "id": 1,
                        "name": "Driven Resort",
                        "image": "https://images.example.com/1.png",
                        "createdAt": STAMP,
                        "updatedAt": STAMP,
                    },
                    {
                        "id": 2,
                        "name": "Driven Palace",
                        "image": "https://images.example.com/2.png",
                        "createdAt": STAMP,
                        "updatedAt": STAMP,
                    },
                ]));
            }

            #[tokio::test]
            async fn test_list_hotels_empty() {
                let server = make_server(eligible(), ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels")
                    .add_header(AUTHORIZATION, bearer(TOKEN))
                    .await;
                response.assert_status_ok();
                response.assert_json(&json!([]));
            }

            #[tokio::test]
            async fn test_hotel_with_rooms() {
                let mut seed = eligible();
                add_hotel(&mut seed, 1, "Driven Resort", &["101", "102"]);
                add_hotel(&mut seed, 2, "Driven Palace", &["201"]);
                let server = make_server(seed, ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels/1")
                    .add_header(AUTHORIZATION, bearer(TOKEN))
                    .await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["id"], 1);
                assert_eq!(body["name"], "Driven Resort");
                assert_eq!(body["createdAt"], STAMP);

                let rooms = body["Rooms"].as_array().unwrap();
                let names: Vec<&str> = rooms.iter().map(|r| r["name"].as_str().unwrap()).collect();
                assert_eq!(names, vec!["101", "102"]);
                for room in rooms {
                    assert_eq!(room["hotelId"], 1);
                    assert!(room["id"].as_i64().unwrap() > 0);
                    assert!(room["capacity"].as_i64().unwrap() > 0);
                    assert_eq!(room["updatedAt"], STAMP);
                }
            }

            #[tokio::test]
            async fn test_hotel_without_rooms() {
                let mut seed = eligible();
                add_hotel(&mut seed, 1, "Driven Resort", &[]);
                let server = make_server(seed, ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels/1")
                    .add_header(AUTHORIZATION, bearer(TOKEN))
                    .await;
                response.assert_status_ok();
                response.assert_json(&json!({
                    "id": 1,
                    "name": "Driven Resort",
                    "image": "https://images.example.com/1.png",
                    "createdAt": STAMP,
                    "updatedAt": STAMP,
                    "Rooms": [],
                }));
            }

            #[tokio::test]
            async fn test_unknown_hotel_is_404() {
                let mut seed = eligible();
                add_hotel(&mut seed, 1, "Driven Resort", &[]);
                let server = make_server(seed, ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels/100")
                    .add_header(AUTHORIZATION, bearer(TOKEN))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["message"], "hotel not found");
            }

            #[tokio::test]
            async fn test_invalid_hotel_id() {
                let strict = make_server(eligible(), ErrorMapping::Strict).await;
                let legacy = make_server(eligible(), ErrorMapping::Legacy).await;

                for path in ["/hotels/abc", "/hotels/0", "/hotels/-1", "/hotels/1.5"] {
                    let response = strict
                        .get(path)
                        .add_header(AUTHORIZATION, bearer(TOKEN))
                        .await;
                    response.assert_status(StatusCode::BAD_REQUEST);
                    let body: Value = response.json();
                    assert_eq!(body["code"], "INVALID_HOTEL_ID", "{}", path);

                    let response = legacy
                        .get(path)
                        .add_header(AUTHORIZATION, bearer(TOKEN))
                        .await;
                    response.assert_status(StatusCode::NOT_FOUND);
                    response.assert_json(&json!({}));
                }
            }

            #[tokio::test]
            async fn test_invalid_hotel_id_checked_before_gate() {
                let server = make_server(Attendee::not_enrolled().seed(), ErrorMapping::Strict).await;

                let response = server
                    .get("/hotels/abc")
                    .add_header(AUTHORIZATION, bearer(TOKEN))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_health_needs_no_token() {
                let server = make_server(SeedData::default(), ErrorMapping::Strict).await;

                for path in ["/health", "/healthz"] {
                    let response = server.get(path).await;
                    response.assert_status_ok();
                    response.assert_json(&json!({"status": "ok", "service": "hotels"}));
                }
            }
        }
    };
}
