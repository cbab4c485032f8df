//! Domain entities read by the hotel listing core
//!
//! Every record carries a serial integer id and UTC `createdAt` / `updatedAt`
//! timestamps. JSON field names are camelCase, matching the shape clients
//! already consume (`hotelId`, `includesHotel`, ...). Nested collections keep
//! their relation names (`Rooms`, `TicketType`, `Address`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serial identifier shared by every table
pub type Id = i32;

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix
///
/// `2024-05-01T12:00:00.000Z`, the same rendering JavaScript clients get
/// from `Date.prototype.toISOString`.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }

    /// Render a timestamp the way responses carry it
    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

// =============================================================================
// Identity
// =============================================================================

/// A registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Id,
    pub email: String,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// An active login binding a bearer token to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub id: Id,
    pub user_id: Id,
    pub token: String,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: Id, token: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            token: token.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Enrollment
// =============================================================================

/// A user's registration for the event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    pub cpf: String,
    #[serde(with = "timestamp")]
    pub birthday: DateTime<Utc>,
    pub phone: String,
    pub user_id: Id,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(
        user_id: Id,
        name: impl Into<String>,
        cpf: impl Into<String>,
        birthday: DateTime<Utc>,
        phone: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            cpf: cpf.into(),
            birthday,
            phone: phone.into(),
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Postal address attached to an enrollment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub id: Id,
    pub cep: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub number: String,
    pub neighborhood: String,
    #[serde(default)]
    pub address_detail: Option<String>,
    pub enrollment_id: Id,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Enrollment joined with its addresses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentWithAddress {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    #[serde(rename = "Address", default)]
    pub address: Vec<Address>,
}

// =============================================================================
// Tickets and payments
// =============================================================================

/// Lifecycle of a ticket purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Reserved,
    Paid,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Reserved => "RESERVED",
            TicketStatus::Paid => "PAID",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "RESERVED" => Some(TicketStatus::Reserved),
            "PAID" => Some(TicketStatus::Paid),
            _ => None,
        }
    }
}

/// A ticket tier: attendance mode and lodging inclusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl TicketType {
    pub fn new(name: impl Into<String>, price: i32, is_remote: bool, includes_hotel: bool) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            price,
            is_remote,
            includes_hotel,
            created_at: now,
            updated_at: now,
        }
    }

    /// In-person attendance with lodging bundled
    pub fn includes_stay(&self) -> bool {
        !self.is_remote && self.includes_hotel
    }
}

/// Admission record owned by an enrollment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(default)]
    pub id: Id,
    pub ticket_type_id: Id,
    pub enrollment_id: Id,
    pub status: TicketStatus,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(enrollment_id: Id, ticket_type_id: Id, status: TicketStatus) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            ticket_type_id,
            enrollment_id,
            status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Ticket joined with its tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketWithType {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(rename = "TicketType")]
    pub ticket_type: TicketType,
}

/// Settlement of a ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub id: Id,
    pub ticket_id: Id,
    pub value: i32,
    pub card_issuer: String,
    pub card_last_digits: String,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        ticket_id: Id,
        value: i32,
        card_issuer: impl Into<String>,
        card_last_digits: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            ticket_id,
            value,
            card_issuer: card_issuer.into(),
            card_last_digits: card_last_digits.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Lodging
// =============================================================================

/// A hotel offered to attendees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    pub image: String,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            image: image.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A room belonging to exactly one hotel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: Id,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn new(hotel_id: Id, name: impl Into<String>, capacity: i32) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            capacity,
            hotel_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Hotel joined with its rooms, in storage order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelWithRooms {
    #[serde(flatten)]
    pub hotel: Hotel,
    #[serde(rename = "Rooms", default)]
    pub rooms: Vec<Room>,
}
