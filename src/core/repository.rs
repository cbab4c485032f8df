//! Repository traits for the persistence lookups the core depends on
//!
//! Each trait covers one table family. Implementations are free to use any
//! storage; the core only needs these read operations. All lookups return
//! `Ok(None)` for "no such record" and reserve `Err` for backend failures.

use crate::core::entity::{
    EnrollmentWithAddress, HotelWithRooms, Hotel, Id, Payment, Session, Ticket, TicketWithType,
};
use anyhow::Result;
use async_trait::async_trait;

/// Enrollment lookups
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Find the enrollment of a user, with its addresses
    async fn find_with_address_by_user_id(
        &self,
        user_id: Id,
    ) -> Result<Option<EnrollmentWithAddress>>;
}

/// Ticket lookups
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Find the ticket owned by an enrollment
    async fn find_by_enrollment_id(&self, enrollment_id: Id) -> Result<Option<Ticket>>;

    /// Find a ticket together with its ticket type
    async fn find_with_type_by_id(&self, ticket_id: Id) -> Result<Option<TicketWithType>>;
}

/// Payment lookups
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Find the payment that settled a ticket
    async fn find_by_ticket_id(&self, ticket_id: Id) -> Result<Option<Payment>>;
}

/// Hotel lookups
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// All hotels in storage order
    ///
    /// `None` means the backend produced no result set at all, which the
    /// service reports as not found. An empty table is `Some(vec![])`.
    async fn find_all(&self) -> Result<Option<Vec<Hotel>>>;

    /// A hotel with its rooms in storage order
    async fn find_with_rooms(&self, hotel_id: Id) -> Result<Option<HotelWithRooms>>;
}

/// Session lookups for bearer authentication
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_token(&self, token: &str) -> Result<Option<Session>>;
}

/// Everything a running server reads from
///
/// Blanket-implemented for any type providing all repositories, so a single
/// backend can be shared as `Arc<dyn HotelStore>`.
pub trait HotelStore:
    EnrollmentRepository + TicketRepository + PaymentRepository + HotelRepository + SessionRepository
{
}

impl<T> HotelStore for T where
    T: EnrollmentRepository
        + TicketRepository
        + PaymentRepository
        + HotelRepository
        + SessionRepository
{
}
