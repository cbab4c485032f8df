//! Hotel read operations behind the eligibility gate

use crate::core::eligibility::check_eligibility;
use crate::core::entity::{Hotel, HotelWithRooms, Id};
use crate::core::error::{HotelError, HotelResult, Resource};
use crate::core::repository::HotelStore;
use std::sync::Arc;

/// Service exposing hotel data to eligible attendees
///
/// Transport-agnostic: handlers resolve the user and route parameters, this
/// type runs the gate and the lookup.
#[derive(Clone)]
pub struct HotelService {
    store: Arc<dyn HotelStore>,
}

impl HotelService {
    pub fn new(store: Arc<dyn HotelStore>) -> Self {
        Self { store }
    }

    /// All hotels, for an eligible user
    ///
    /// An empty list is a valid answer; only an absent result set is an error.
    pub async fn list_hotels(&self, user_id: Id) -> HotelResult<Vec<Hotel>> {
        check_eligibility(self.store.as_ref(), user_id).await?;

        let hotels = self
            .store
            .find_all()
            .await?
            .ok_or(HotelError::not_found(Resource::Hotels))?;

        tracing::debug!(user_id, count = hotels.len(), "listed hotels");
        Ok(hotels)
    }

    /// One hotel with its rooms, for an eligible user
    pub async fn list_hotel_rooms(&self, user_id: Id, hotel_id: Id) -> HotelResult<HotelWithRooms> {
        check_eligibility(self.store.as_ref(), user_id).await?;

        let hotel = self
            .store
            .find_with_rooms(hotel_id)
            .await?
            .ok_or(HotelError::not_found(Resource::Hotel))?;

        tracing::debug!(user_id, hotel_id, rooms = hotel.rooms.len(), "listed hotel rooms");
        Ok(hotel)
    }
}

/// Parse a `hotelId` route segment into a positive id
pub fn parse_hotel_id(raw: &str) -> HotelResult<Id> {
    match raw.trim().parse::<Id>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(HotelError::InvalidHotelId {
            value: raw.to_string(),
        }),
    }
}
