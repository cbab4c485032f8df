//! # Hotel Listings
//!
//! Eligibility-gated hotel and room listings for event attendees.
//!
//! ## Features
//!
//! - **Eligibility gate**: hotel data is shown only to users with an
//!   enrollment, an in-person ticket that includes lodging, and a payment
//! - **Bearer sessions**: every hotel route resolves `Authorization: Bearer`
//!   tokens against stored sessions
//! - **Typed errors**: one `HotelError` enum, rendered through a configurable
//!   `ErrorMapping` (`strict` status codes or `legacy` `404 {}`)
//! - **Pluggable storage**: in-memory store seeded from YAML, or PostgreSQL
//!   behind the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hotels::prelude::*;
//!
//! let store = Arc::new(InMemoryStore::from_seed(SeedData::from_yaml_file("seed.yaml")?)?);
//!
//! ServerBuilder::new()
//!     .with_store(store)
//!     .with_error_mapping(ErrorMapping::Strict)
//!     .serve("127.0.0.1:4000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod hotels;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthContext, AuthProvider, AuthState, AuthenticatedUser, SessionAuthProvider},
        eligibility::check_eligibility,
        entity::{
            Address, Enrollment, EnrollmentWithAddress, Hotel, HotelWithRooms, Id, Payment, Room,
            Session, Ticket, TicketStatus, TicketType, TicketWithType, User,
        },
        error::{ConflictReason, ErrorMapping, HotelError, HotelResult, Resource},
        repository::{
            EnrollmentRepository, HotelRepository, HotelStore, PaymentRepository,
            SessionRepository, TicketRepository,
        },
    };

    // === Hotels ===
    pub use crate::hotels::{AppState, HotelService, parse_hotel_id};

    // === Storage ===
    pub use crate::storage::{InMemoryStore, SeedData};
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::{ConfigError, ServiceConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;

    // === Axum ===
    pub use axum::{Router, routing::get};
}
