//! HTTP handlers for hotel routes
//!
//! Both routes require an [`AuthenticatedUser`]; the extractor rejects
//! before the handler body runs.

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::core::auth::{AuthState, AuthenticatedUser};
use crate::hotels::service::{HotelService, parse_hotel_id};

/// Application state shared across handlers
///
/// Handlers render failures with `auth.error_mapping`, the same mapping
/// the extractor uses for 401s.
#[derive(Clone)]
pub struct AppState {
    pub service: HotelService,
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// List all hotels
///
/// GET /hotels
pub async fn list_hotels(State(state): State<AppState>, user: AuthenticatedUser) -> Response {
    match state.service.list_hotels(user.user_id).await {
        Ok(hotels) => Json(hotels).into_response(),
        Err(e) => e.into_response_with(state.auth.error_mapping),
    }
}

/// Get one hotel with its rooms
///
/// GET /hotels/{hotelId}
pub async fn get_hotel_rooms(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(hotel_id): Path<String>,
) -> Response {
    let hotel_id = match parse_hotel_id(&hotel_id) {
        Ok(id) => id,
        Err(e) => return e.into_response_with(state.auth.error_mapping),
    };

    match state.service.list_hotel_rooms(user.user_id, hotel_id).await {
        Ok(hotel) => Json(hotel).into_response(),
        Err(e) => e.into_response_with(state.auth.error_mapping),
    }
}
