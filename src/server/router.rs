//! Router builder utilities for hotel routes

use crate::hotels::handlers::{AppState, get_hotel_rooms, list_hotels};
use axum::{Router, routing::get};

/// Build hotel routes
///
/// Both routes require a bearer session:
/// - GET /hotels - List every hotel
/// - GET /hotels/{hotelId} - One hotel with its rooms
pub fn build_hotel_routes(state: AppState) -> Router {
    Router::new()
        .route("/hotels", get(list_hotels))
        .route("/hotels/{hotelId}", get(get_hotel_rooms))
        .with_state(state)
}
