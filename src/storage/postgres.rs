//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresStore`, implementing every repository trait against a
//! `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! hotel-listings = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! One table per entity, named after the entity (`"Hotel"`, `"Room"`, ...),
//! with camelCase quoted columns and serial integer ids. Timestamps are
//! `TIMESTAMPTZ(3)`. Ticket status is stored as text (`RESERVED` / `PAID`).

use crate::core::entity::{
    Address, Enrollment, EnrollmentWithAddress, Hotel, HotelWithRooms, Id, Payment, Room,
    Session, Ticket, TicketStatus, TicketType, TicketWithType,
};
use crate::core::repository::{
    EnrollmentRepository, HotelRepository, PaymentRepository, SessionRepository,
    TicketRepository,
};
use crate::storage::seed::SeedData;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "User" (
        id SERIAL PRIMARY KEY,
        email VARCHAR(255) NOT NULL UNIQUE,
        "createdAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP,
        "updatedAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Session" (
        id SERIAL PRIMARY KEY,
        "userId" INTEGER NOT NULL REFERENCES "User"(id),
        token TEXT NOT NULL,
        "createdAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP,
        "updatedAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"CREATE INDEX IF NOT EXISTS "Session_token_idx" ON "Session"(token)"#,
    r#"CREATE TABLE IF NOT EXISTS "Enrollment" (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        cpf VARCHAR(255) NOT NULL,
        birthday TIMESTAMPTZ(3) NOT NULL,
        phone VARCHAR(255) NOT NULL,
        "userId" INTEGER NOT NULL UNIQUE REFERENCES "User"(id),
        "createdAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP,
        "updatedAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Address" (
        id SERIAL PRIMARY KEY,
        cep VARCHAR(255) NOT NULL,
        street VARCHAR(255) NOT NULL,
        city VARCHAR(255) NOT NULL,
        state VARCHAR(255) NOT NULL,
        number VARCHAR(255) NOT NULL,
        neighborhood VARCHAR(255) NOT NULL,
        "addressDetail" VARCHAR(255),
        "enrollmentId" INTEGER NOT NULL REFERENCES "Enrollment"(id),
        "createdAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP,
        "updatedAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "TicketType" (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        price INTEGER NOT NULL,
        "isRemote" BOOLEAN NOT NULL,
        "includesHotel" BOOLEAN NOT NULL,
        "createdAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP,
        "updatedAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Ticket" (
        id SERIAL PRIMARY KEY,
        "ticketTypeId" INTEGER NOT NULL REFERENCES "TicketType"(id),
        "enrollmentId" INTEGER NOT NULL UNIQUE REFERENCES "Enrollment"(id),
        status TEXT NOT NULL CHECK (status IN ('RESERVED', 'PAID')),
        "createdAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP,
        "updatedAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Payment" (
        id SERIAL PRIMARY KEY,
        "ticketId" INTEGER NOT NULL REFERENCES "Ticket"(id),
        value INTEGER NOT NULL,
        "cardIssuer" VARCHAR(255) NOT NULL,
        "cardLastDigits" VARCHAR(255) NOT NULL,
        "createdAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP,
        "updatedAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Hotel" (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        image VARCHAR(255) NOT NULL,
        "createdAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP,
        "updatedAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Room" (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        capacity INTEGER NOT NULL,
        "hotelId" INTEGER NOT NULL REFERENCES "Hotel"(id),
        "createdAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP,
        "updatedAt" TIMESTAMPTZ(3) NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"CREATE INDEX IF NOT EXISTS "Room_hotelId_idx" ON "Room"("hotelId")"#,
];

/// Tables in dependency order, for sequence resets and truncation
pub const TABLES: &[&str] = &[
    "User",
    "Session",
    "Enrollment",
    "Address",
    "TicketType",
    "Ticket",
    "Payment",
    "Hotel",
    "Room",
];

/// Apply the required tables and indexes (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| anyhow!("Failed to apply schema: {}", e))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i32,
    #[sqlx(rename = "userId")]
    user_id: i32,
    token: String,
    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            user_id: row.user_id,
            token: row.token,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    id: i32,
    name: String,
    cpf: String,
    birthday: DateTime<Utc>,
    phone: String,
    #[sqlx(rename = "userId")]
    user_id: i32,
    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Enrollment {
            id: row.id,
            name: row.name,
            cpf: row.cpf,
            birthday: row.birthday,
            phone: row.phone,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    id: i32,
    cep: String,
    street: String,
    city: String,
    state: String,
    number: String,
    neighborhood: String,
    #[sqlx(rename = "addressDetail")]
    address_detail: Option<String>,
    #[sqlx(rename = "enrollmentId")]
    enrollment_id: i32,
    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Address {
            id: row.id,
            cep: row.cep,
            street: row.street,
            city: row.city,
            state: row.state,
            number: row.number,
            neighborhood: row.neighborhood,
            address_detail: row.address_detail,
            enrollment_id: row.enrollment_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TicketTypeRow {
    id: i32,
    name: String,
    price: i32,
    #[sqlx(rename = "isRemote")]
    is_remote: bool,
    #[sqlx(rename = "includesHotel")]
    includes_hotel: bool,
    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl From<TicketTypeRow> for TicketType {
    fn from(row: TicketTypeRow) -> Self {
        TicketType {
            id: row.id,
            name: row.name,
            price: row.price,
            is_remote: row.is_remote,
            includes_hotel: row.includes_hotel,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i32,
    #[sqlx(rename = "ticketTypeId")]
    ticket_type_id: i32,
    #[sqlx(rename = "enrollmentId")]
    enrollment_id: i32,
    status: String,
    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = anyhow::Error;

    fn try_from(row: TicketRow) -> Result<Self> {
        let status = TicketStatus::parse(&row.status)
            .ok_or_else(|| anyhow!("ticket {} has unknown status '{}'", row.id, row.status))?;
        Ok(Ticket {
            id: row.id,
            ticket_type_id: row.ticket_type_id,
            enrollment_id: row.enrollment_id,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: i32,
    #[sqlx(rename = "ticketId")]
    ticket_id: i32,
    value: i32,
    #[sqlx(rename = "cardIssuer")]
    card_issuer: String,
    #[sqlx(rename = "cardLastDigits")]
    card_last_digits: String,
    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            ticket_id: row.ticket_id,
            value: row.value,
            card_issuer: row.card_issuer,
            card_last_digits: row.card_last_digits,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct HotelRow {
    id: i32,
    name: String,
    image: String,
    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Hotel {
            id: row.id,
            name: row.name,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: i32,
    name: String,
    capacity: i32,
    #[sqlx(rename = "hotelId")]
    hotel_id: i32,
    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            name: row.name,
            capacity: row.capacity,
            hotel_id: row.hotel_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// PostgresStore
// ---------------------------------------------------------------------------

/// Repository implementation backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// use hotels::storage::PostgresStore;
///
/// let store = PostgresStore::connect("postgres://localhost/hotels", 5).await?;
/// hotels::storage::postgres::ensure_schema(store.pool()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new `PostgresStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url`
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| anyhow!("Failed to connect to PostgreSQL: {}", e))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert seed rows in a single transaction
    ///
    /// Rows with an explicit id keep it; other rows take the highest id so
    /// far plus one, as in the in-memory store. Sequences are moved past the
    /// highest id afterwards so later inserts do not collide.
    pub async fn load_seed(&self, seed: &SeedData) -> Result<()> {
        seed.validate()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| anyhow!("Failed to begin seed transaction: {}", e))?;

        for user in &seed.users {
            sqlx::query(
                r#"INSERT INTO "User" (id, email, "createdAt", "updatedAt")
                   VALUES (COALESCE($1, (SELECT COALESCE(MAX(id), 0) + 1 FROM "User")), $2, $3, $4)"#,
            )
            .bind(explicit_id(user.id))
            .bind(&user.email)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for session in &seed.sessions {
            sqlx::query(
                r#"INSERT INTO "Session" (id, "userId", token, "createdAt", "updatedAt")
                   VALUES (COALESCE($1, (SELECT COALESCE(MAX(id), 0) + 1 FROM "Session")), $2, $3, $4, $5)"#,
            )
            .bind(explicit_id(session.id))
            .bind(session.user_id)
            .bind(&session.token)
            .bind(session.created_at)
            .bind(session.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for e in &seed.enrollments {
            sqlx::query(
                r#"INSERT INTO "Enrollment" (id, name, cpf, birthday, phone, "userId", "createdAt", "updatedAt")
                   VALUES (COALESCE($1, (SELECT COALESCE(MAX(id), 0) + 1 FROM "Enrollment")), $2, $3, $4, $5, $6, $7, $8)"#,
            )
            .bind(explicit_id(e.id))
            .bind(&e.name)
            .bind(&e.cpf)
            .bind(e.birthday)
            .bind(&e.phone)
            .bind(e.user_id)
            .bind(e.created_at)
            .bind(e.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for a in &seed.addresses {
            sqlx::query(
                r#"INSERT INTO "Address" (id, cep, street, city, state, number, neighborhood, "addressDetail", "enrollmentId", "createdAt", "updatedAt")
                   VALUES (COALESCE($1, (SELECT COALESCE(MAX(id), 0) + 1 FROM "Address")), $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
            )
            .bind(explicit_id(a.id))
            .bind(&a.cep)
            .bind(&a.street)
            .bind(&a.city)
            .bind(&a.state)
            .bind(&a.number)
            .bind(&a.neighborhood)
            .bind(&a.address_detail)
            .bind(a.enrollment_id)
            .bind(a.created_at)
            .bind(a.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for t in &seed.ticket_types {
            sqlx::query(
                r#"INSERT INTO "TicketType" (id, name, price, "isRemote", "includesHotel", "createdAt", "updatedAt")
                   VALUES (COALESCE($1, (SELECT COALESCE(MAX(id), 0) + 1 FROM "TicketType")), $2, $3, $4, $5, $6, $7)"#,
            )
            .bind(explicit_id(t.id))
            .bind(&t.name)
            .bind(t.price)
            .bind(t.is_remote)
            .bind(t.includes_hotel)
            .bind(t.created_at)
            .bind(t.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for t in &seed.tickets {
            sqlx::query(
                r#"INSERT INTO "Ticket" (id, "ticketTypeId", "enrollmentId", status, "createdAt", "updatedAt")
                   VALUES (COALESCE($1, (SELECT COALESCE(MAX(id), 0) + 1 FROM "Ticket")), $2, $3, $4, $5, $6)"#,
            )
            .bind(explicit_id(t.id))
            .bind(t.ticket_type_id)
            .bind(t.enrollment_id)
            .bind(t.status.as_str())
            .bind(t.created_at)
            .bind(t.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for p in &seed.payments {
            sqlx::query(
                r#"INSERT INTO "Payment" (id, "ticketId", value, "cardIssuer", "cardLastDigits", "createdAt", "updatedAt")
                   VALUES (COALESCE($1, (SELECT COALESCE(MAX(id), 0) + 1 FROM "Payment")), $2, $3, $4, $5, $6, $7)"#,
            )
            .bind(explicit_id(p.id))
            .bind(p.ticket_id)
            .bind(p.value)
            .bind(&p.card_issuer)
            .bind(&p.card_last_digits)
            .bind(p.created_at)
            .bind(p.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for h in &seed.hotels {
            sqlx::query(
                r#"INSERT INTO "Hotel" (id, name, image, "createdAt", "updatedAt")
                   VALUES (COALESCE($1, (SELECT COALESCE(MAX(id), 0) + 1 FROM "Hotel")), $2, $3, $4, $5)"#,
            )
            .bind(explicit_id(h.id))
            .bind(&h.name)
            .bind(&h.image)
            .bind(h.created_at)
            .bind(h.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for r in &seed.rooms {
            sqlx::query(
                r#"INSERT INTO "Room" (id, name, capacity, "hotelId", "createdAt", "updatedAt")
                   VALUES (COALESCE($1, (SELECT COALESCE(MAX(id), 0) + 1 FROM "Room")), $2, $3, $4, $5, $6)"#,
            )
            .bind(explicit_id(r.id))
            .bind(&r.name)
            .bind(r.capacity)
            .bind(r.hotel_id)
            .bind(r.created_at)
            .bind(r.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for table in TABLES {
            let statement = format!(
                r#"SELECT setval(pg_get_serial_sequence('"{table}"', 'id'), COALESCE((SELECT MAX(id) FROM "{table}"), 0) + 1, false)"#
            );
            sqlx::query(&statement).execute(&mut *tx).await?;
        }

        tx.commit()
            .await
            .map_err(|e| anyhow!("Failed to commit seed transaction: {}", e))?;

        tracing::info!("PostgreSQL store seeded");
        Ok(())
    }
}

/// Serial ids are positive; 0 asks the sequence for one
fn explicit_id(id: Id) -> Option<Id> {
    (id > 0).then_some(id)
}

#[async_trait]
impl EnrollmentRepository for PostgresStore {
    async fn find_with_address_by_user_id(
        &self,
        user_id: Id,
    ) -> Result<Option<EnrollmentWithAddress>> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"SELECT * FROM "Enrollment" WHERE "userId" = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch enrollment: {}", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let address = sqlx::query_as::<_, AddressRow>(
            r#"SELECT * FROM "Address" WHERE "enrollmentId" = $1 ORDER BY id"#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch addresses: {}", e))?;

        Ok(Some(EnrollmentWithAddress {
            enrollment: row.into(),
            address: address.into_iter().map(Into::into).collect(),
        }))
    }
}

#[async_trait]
impl TicketRepository for PostgresStore {
    async fn find_by_enrollment_id(&self, enrollment_id: Id) -> Result<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>(
            r#"SELECT * FROM "Ticket" WHERE "enrollmentId" = $1 ORDER BY id LIMIT 1"#,
        )
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch ticket: {}", e))?;

        row.map(Ticket::try_from).transpose()
    }

    async fn find_with_type_by_id(&self, ticket_id: Id) -> Result<Option<TicketWithType>> {
        let row = sqlx::query_as::<_, TicketRow>(r#"SELECT * FROM "Ticket" WHERE id = $1"#)
            .bind(ticket_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to fetch ticket: {}", e))?;

        let Some(ticket) = row.map(Ticket::try_from).transpose()? else {
            return Ok(None);
        };

        let ticket_type = sqlx::query_as::<_, TicketTypeRow>(
            r#"SELECT * FROM "TicketType" WHERE id = $1"#,
        )
        .bind(ticket.ticket_type_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch ticket type: {}", e))?;

        Ok(ticket_type.map(|ticket_type| TicketWithType {
            ticket,
            ticket_type: ticket_type.into(),
        }))
    }
}

#[async_trait]
impl PaymentRepository for PostgresStore {
    async fn find_by_ticket_id(&self, ticket_id: Id) -> Result<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"SELECT * FROM "Payment" WHERE "ticketId" = $1 ORDER BY id LIMIT 1"#,
        )
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch payment: {}", e))?;

        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl HotelRepository for PostgresStore {
    async fn find_all(&self) -> Result<Option<Vec<Hotel>>> {
        let rows = sqlx::query_as::<_, HotelRow>(r#"SELECT * FROM "Hotel" ORDER BY id"#)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to fetch hotels: {}", e))?;

        Ok(Some(rows.into_iter().map(Into::into).collect()))
    }

    async fn find_with_rooms(&self, hotel_id: Id) -> Result<Option<HotelWithRooms>> {
        let row = sqlx::query_as::<_, HotelRow>(r#"SELECT * FROM "Hotel" WHERE id = $1"#)
            .bind(hotel_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to fetch hotel: {}", e))?;

        let Some(hotel) = row else {
            return Ok(None);
        };

        let rooms = sqlx::query_as::<_, RoomRow>(
            r#"SELECT * FROM "Room" WHERE "hotelId" = $1 ORDER BY id"#,
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch rooms: {}", e))?;

        Ok(Some(HotelWithRooms {
            hotel: hotel.into(),
            rooms: rooms.into_iter().map(Into::into).collect(),
        }))
    }
}

#[async_trait]
impl SessionRepository for PostgresStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"SELECT * FROM "Session" WHERE token = $1 ORDER BY id LIMIT 1"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch session: {}", e))?;

        Ok(row.map(Into::into))
    }
}
