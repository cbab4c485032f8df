//! Hotel listings: the service and its HTTP handlers

pub mod handlers;
pub mod service;

pub use handlers::AppState;
pub use service::{HotelService, parse_hotel_id};
