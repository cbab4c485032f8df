//! Seed documents for populating the in-memory store
//!
//! A seed is a YAML document with one list per table. Every list is
//! optional; rows without an `id` get the next serial id, rows without
//! timestamps get the load time.
//!
//! ```yaml
//! users:
//!   - id: 1
//!     email: guest@example.com
//! sessions:
//!   - userId: 1
//!     token: demo-token
//! hotels:
//!   - id: 1
//!     name: Driven Resort
//!     image: https://example.com/resort.png
//! rooms:
//!   - name: "101"
//!     capacity: 2
//!     hotelId: 1
//! ```

use crate::core::entity::{
    Address, Enrollment, Hotel, Id, Payment, Room, Session, Ticket, TicketType, User,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rows to load into a fresh store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub ticket_types: Vec<TicketType>,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl SeedData {
    /// Load seed data from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid seed file '{}'", path))
    }

    /// Load seed data from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let seed: Self = serde_yaml::from_str(yaml)?;
        Ok(seed)
    }

    /// Check that ids are unique and every foreign key points at a seeded row
    ///
    /// Only rows with explicit ids can be referenced, so references are
    /// checked against explicit ids.
    pub fn validate(&self) -> Result<()> {
        unique("user", self.users.iter().map(|u| u.id))?;
        unique("session", self.sessions.iter().map(|s| s.id))?;
        unique("enrollment", self.enrollments.iter().map(|e| e.id))?;
        unique("address", self.addresses.iter().map(|a| a.id))?;
        unique("ticket type", self.ticket_types.iter().map(|t| t.id))?;
        unique("ticket", self.tickets.iter().map(|t| t.id))?;
        unique("payment", self.payments.iter().map(|p| p.id))?;
        unique("hotel", self.hotels.iter().map(|h| h.id))?;
        unique("room", self.rooms.iter().map(|r| r.id))?;

        let users = ids(self.users.iter().map(|u| u.id));
        let enrollments = ids(self.enrollments.iter().map(|e| e.id));
        let ticket_types = ids(self.ticket_types.iter().map(|t| t.id));
        let tickets = ids(self.tickets.iter().map(|t| t.id));
        let hotels = ids(self.hotels.iter().map(|h| h.id));

        for session in &self.sessions {
            check("session", "user", session.user_id, &users)?;
        }
        for enrollment in &self.enrollments {
            check("enrollment", "user", enrollment.user_id, &users)?;
        }
        for address in &self.addresses {
            check("address", "enrollment", address.enrollment_id, &enrollments)?;
        }
        for ticket in &self.tickets {
            check("ticket", "enrollment", ticket.enrollment_id, &enrollments)?;
            check("ticket", "ticket type", ticket.ticket_type_id, &ticket_types)?;
        }
        for payment in &self.payments {
            check("payment", "ticket", payment.ticket_id, &tickets)?;
        }
        for room in &self.rooms {
            check("room", "hotel", room.hotel_id, &hotels)?;
        }

        Ok(())
    }
}

fn ids(values: impl Iterator<Item = Id>) -> HashSet<Id> {
    values.filter(|id| *id > 0).collect()
}

/// Replay serial id assignment for one table and reject repeats
///
/// Rows without an id take the highest id seen so far plus one, so an
/// explicit id listed after auto-assigned rows can collide with them.
fn unique(table: &str, values: impl Iterator<Item = Id>) -> Result<()> {
    let mut last = 0;
    let mut seen = HashSet::new();
    for id in values {
        let id = if id > 0 { id } else { last + 1 };
        last = last.max(id);
        if !seen.insert(id) {
            bail!("duplicate {} id {}", table, id);
        }
    }
    Ok(())
}

fn check(owner: &str, target: &str, id: Id, known: &HashSet<Id>) -> Result<()> {
    if !known.contains(&id) {
        bail!("{} references unknown {} {}", owner, target, id);
    }
    Ok(())
}
