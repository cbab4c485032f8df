//! Core types and rules shared by every transport

pub mod auth;
pub mod eligibility;
pub mod entity;
pub mod error;
pub mod repository;

pub use auth::{AuthContext, AuthProvider, AuthState, AuthenticatedUser, SessionAuthProvider};
pub use eligibility::check_eligibility;
pub use entity::{
    Address, Enrollment, EnrollmentWithAddress, Hotel, HotelWithRooms, Id, Payment, Room,
    Session, Ticket, TicketStatus, TicketType, TicketWithType, User,
};
pub use error::{ConflictReason, ErrorMapping, ErrorResponse, HotelError, HotelResult, Resource};
pub use repository::{
    EnrollmentRepository, HotelRepository, HotelStore, PaymentRepository, SessionRepository,
    TicketRepository,
};
