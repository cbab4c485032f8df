//! Eligibility gate shared by every hotel read
//!
//! A user may see hotel data only when all of the following hold, checked in
//! this order and stopping at the first failure:
//!
//! 1. the user has an enrollment
//! 2. the enrollment has a ticket
//! 3. the ticket tier is in-person and includes lodging
//! 4. the ticket has been paid

use crate::core::entity::Id;
use crate::core::error::{ConflictReason, HotelError, HotelResult, Resource};
use crate::core::repository::HotelStore;

/// Run the eligibility chain for `user_id`
///
/// Produces no value on success; the caller goes on to fetch data.
pub async fn check_eligibility<S>(store: &S, user_id: Id) -> HotelResult<()>
where
    S: HotelStore + ?Sized,
{
    let Some(enrollment) = store.find_with_address_by_user_id(user_id).await? else {
        tracing::debug!(user_id, "no enrollment");
        return Err(HotelError::not_found(Resource::Enrollment));
    };

    let Some(ticket) = store.find_by_enrollment_id(enrollment.enrollment.id).await? else {
        tracing::debug!(user_id, enrollment_id = enrollment.enrollment.id, "no ticket");
        return Err(HotelError::not_found(Resource::Ticket));
    };

    let Some(with_type) = store.find_with_type_by_id(ticket.id).await? else {
        tracing::warn!(
            user_id,
            ticket_id = ticket.id,
            ticket_type_id = ticket.ticket_type_id,
            "ticket without ticket type"
        );
        return Err(HotelError::not_found(Resource::TicketType));
    };

    if !with_type.ticket_type.includes_stay() {
        tracing::debug!(
            user_id,
            ticket_type_id = with_type.ticket_type.id,
            is_remote = with_type.ticket_type.is_remote,
            includes_hotel = with_type.ticket_type.includes_hotel,
            "ticket tier has no stay"
        );
        return Err(HotelError::conflict(ConflictReason::NonStayEvent));
    }

    if store.find_by_ticket_id(ticket.id).await?.is_none() {
        tracing::debug!(user_id, ticket_id = ticket.id, "ticket not paid");
        return Err(HotelError::conflict(ConflictReason::PaymentNotConcluded));
    }

    Ok(())
}
