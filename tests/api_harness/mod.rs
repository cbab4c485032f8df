//! Shared HTTP test suite for storage backends
//!
//! `hotel_api_tests!` takes an async factory turning a `SeedData` into a
//! store, and generates the full request-level suite against it. Fixtures
//! below build the seed documents the suite loads.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use hotels::prelude::*;

#[macro_use]
pub mod suite;

/// Session token for the user every fixture enrolls
pub const TOKEN: &str = "attendee-token";

/// Session token for a user without an enrollment
pub const STRANGER_TOKEN: &str = "stranger-token";

pub const ATTENDEE_ID: Id = 1;
pub const STRANGER_ID: Id = 2;

/// Fixed timestamp with millisecond precision, stable across backends
pub fn stamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-01T12:00:00.000Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub const STAMP: &str = "2024-05-01T12:00:00.000Z";

/// How far the attendee got through registration
#[derive(Debug, Clone, Copy)]
pub struct Attendee {
    pub enrolled: bool,
    pub ticket: bool,
    pub is_remote: bool,
    pub includes_hotel: bool,
    pub paid: bool,
}

impl Attendee {
    /// In-person, lodging included, paid
    pub fn eligible() -> Self {
        Self {
            enrolled: true,
            ticket: true,
            is_remote: false,
            includes_hotel: true,
            paid: true,
        }
    }

    pub fn not_enrolled() -> Self {
        Self {
            enrolled: false,
            ..Self::eligible()
        }
    }

    pub fn without_ticket() -> Self {
        Self {
            ticket: false,
            ..Self::eligible()
        }
    }

    pub fn remote() -> Self {
        Self {
            is_remote: true,
            ..Self::eligible()
        }
    }

    pub fn without_hotel() -> Self {
        Self {
            includes_hotel: false,
            ..Self::eligible()
        }
    }

    pub fn unpaid() -> Self {
        Self {
            paid: false,
            ..Self::eligible()
        }
    }

    /// Seed holding this attendee plus a stranger with only a session
    pub fn seed(self) -> SeedData {
        let mut seed = SeedData::default();

        for (id, email, token) in [
            (ATTENDEE_ID, "attendee@example.com", TOKEN),
            (STRANGER_ID, "stranger@example.com", STRANGER_TOKEN),
        ] {
            let mut user = User::new(email);
            user.id = id;
            seed.users.push(user);
            seed.sessions.push(Session::new(id, token));
        }

        if !self.enrolled {
            return seed;
        }

        let mut enrollment = Enrollment::new(
            ATTENDEE_ID,
            "Ada Lovelace",
            "12345678909",
            stamp(),
            "(21) 98765-4321",
        );
        enrollment.id = 1;
        seed.enrollments.push(enrollment);

        seed.addresses.push(Address {
            id: 1,
            cep: "20040-020".to_string(),
            street: "Avenida Rio Branco".to_string(),
            city: "Rio de Janeiro".to_string(),
            state: "RJ".to_string(),
            number: "1".to_string(),
            neighborhood: "Centro".to_string(),
            address_detail: None,
            enrollment_id: 1,
            created_at: stamp(),
            updated_at: stamp(),
        });

        if !self.ticket {
            return seed;
        }

        let mut ticket_type = TicketType::new("Presencial", 600, self.is_remote, self.includes_hotel);
        ticket_type.id = 1;
        seed.ticket_types.push(ticket_type);

        let status = if self.paid {
            TicketStatus::Paid
        } else {
            TicketStatus::Reserved
        };
        let mut ticket = Ticket::new(1, 1, status);
        ticket.id = 1;
        seed.tickets.push(ticket);

        if self.paid {
            seed.payments.push(Payment::new(1, 600, "VISA", "4242"));
        }

        seed
    }
}

/// Add a hotel with fixed timestamps and the given room names
pub fn add_hotel(seed: &mut SeedData, id: Id, name: &str, rooms: &[&str]) {
    let mut hotel = Hotel::new(name, format!("https://images.example.com/{}.png", id));
    hotel.id = id;
    hotel.created_at = stamp();
    hotel.updated_at = stamp();
    seed.hotels.push(hotel);

    for (i, room) in rooms.iter().enumerate() {
        let mut room = Room::new(id, *room, (i as i32 % 3) + 1);
        room.created_at = stamp();
        room.updated_at = stamp();
        seed.rooms.push(room);
    }
}
