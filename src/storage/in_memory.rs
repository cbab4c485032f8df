//! In-memory implementation of every repository, for tests and development

use crate::core::entity::{
    Address, Enrollment, EnrollmentWithAddress, Hotel, HotelWithRooms, Id, Payment, Room,
    Session, Ticket, TicketType, TicketWithType, User,
};
use crate::core::repository::{
    EnrollmentRepository, HotelRepository, PaymentRepository, SessionRepository,
    TicketRepository,
};
use crate::storage::seed::SeedData;
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Rows kept in insertion order, with the last id handed out
#[derive(Debug)]
struct Table<T> {
    name: &'static str,
    rows: Vec<T>,
    ids: HashSet<Id>,
    last_id: Id,
}

impl<T: Clone> Table<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: Vec::new(),
            ids: HashSet::new(),
            last_id: 0,
        }
    }

    /// Store a row, assigning the next serial id when `id` is not positive
    ///
    /// An explicit id that is already taken is rejected.
    fn insert(&mut self, mut row: T, id: impl Fn(&mut T) -> &mut Id) -> Result<T> {
        let slot = id(&mut row);
        if *slot <= 0 {
            *slot = self.last_id + 1;
        } else if self.ids.contains(&*slot) {
            bail!("{} id {} is already taken", self.name, *slot);
        }
        self.last_id = self.last_id.max(*slot);
        self.ids.insert(*slot);
        self.rows.push(row.clone());
        Ok(row)
    }

    fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.iter().find(|row| predicate(row)).cloned()
    }

    fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.iter().filter(|row| predicate(row)).cloned().collect()
    }
}

#[derive(Debug)]
struct Tables {
    users: Table<User>,
    sessions: Table<Session>,
    enrollments: Table<Enrollment>,
    addresses: Table<Address>,
    ticket_types: Table<TicketType>,
    tickets: Table<Ticket>,
    payments: Table<Payment>,
    hotels: Table<Hotel>,
    rooms: Table<Room>,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            users: Table::new("user"),
            sessions: Table::new("session"),
            enrollments: Table::new("enrollment"),
            addresses: Table::new("address"),
            ticket_types: Table::new("ticket type"),
            tickets: Table::new("ticket"),
            payments: Table::new("payment"),
            hotels: Table::new("hotel"),
            rooms: Table::new("room"),
        }
    }
}

/// In-memory store implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Rows are returned in insertion order, like a serial primary key scan.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated from seed data
    pub fn from_seed(seed: SeedData) -> Result<Self> {
        let store = Self::new();
        store.load_seed(seed)?;
        Ok(store)
    }

    /// Insert seed rows, checking that every reference resolves
    pub fn load_seed(&self, seed: SeedData) -> Result<()> {
        seed.validate()?;

        for user in seed.users {
            self.insert_user(user)?;
        }
        for session in seed.sessions {
            self.insert_session(session)?;
        }
        for enrollment in seed.enrollments {
            self.insert_enrollment(enrollment)?;
        }
        for address in seed.addresses {
            self.insert_address(address)?;
        }
        for ticket_type in seed.ticket_types {
            self.insert_ticket_type(ticket_type)?;
        }
        for ticket in seed.tickets {
            self.insert_ticket(ticket)?;
        }
        for payment in seed.payments {
            self.insert_payment(payment)?;
        }
        for hotel in seed.hotels {
            self.insert_hotel(hotel)?;
        }
        for room in seed.rooms {
            self.insert_room(room)?;
        }

        tracing::info!("In-memory store seeded");
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }

    pub fn insert_user(&self, user: User) -> Result<User> {
        self.write()?.users.insert(user, |u| &mut u.id)
    }

    pub fn insert_session(&self, session: Session) -> Result<Session> {
        self.write()?.sessions.insert(session, |s| &mut s.id)
    }

    pub fn insert_enrollment(&self, enrollment: Enrollment) -> Result<Enrollment> {
        self.write()?.enrollments.insert(enrollment, |e| &mut e.id)
    }

    pub fn insert_address(&self, address: Address) -> Result<Address> {
        self.write()?.addresses.insert(address, |a| &mut a.id)
    }

    pub fn insert_ticket_type(&self, ticket_type: TicketType) -> Result<TicketType> {
        self.write()?.ticket_types.insert(ticket_type, |t| &mut t.id)
    }

    pub fn insert_ticket(&self, ticket: Ticket) -> Result<Ticket> {
        self.write()?.tickets.insert(ticket, |t| &mut t.id)
    }

    pub fn insert_payment(&self, payment: Payment) -> Result<Payment> {
        self.write()?.payments.insert(payment, |p| &mut p.id)
    }

    pub fn insert_hotel(&self, hotel: Hotel) -> Result<Hotel> {
        self.write()?.hotels.insert(hotel, |h| &mut h.id)
    }

    pub fn insert_room(&self, room: Room) -> Result<Room> {
        self.write()?.rooms.insert(room, |r| &mut r.id)
    }

    /// Number of hotels currently stored
    pub fn hotel_count(&self) -> Result<usize> {
        Ok(self.read()?.hotels.rows.len())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn find_with_address_by_user_id(
        &self,
        user_id: Id,
    ) -> Result<Option<EnrollmentWithAddress>> {
        let tables = self.read()?;

        Ok(tables
            .enrollments
            .find(|e| e.user_id == user_id)
            .map(|enrollment| {
                let address = tables
                    .addresses
                    .filter(|a| a.enrollment_id == enrollment.id);
                EnrollmentWithAddress {
                    enrollment,
                    address,
                }
            }))
    }
}

#[async_trait]
impl TicketRepository for InMemoryStore {
    async fn find_by_enrollment_id(&self, enrollment_id: Id) -> Result<Option<Ticket>> {
        Ok(self.read()?.tickets.find(|t| t.enrollment_id == enrollment_id))
    }

    async fn find_with_type_by_id(&self, ticket_id: Id) -> Result<Option<TicketWithType>> {
        let tables = self.read()?;

        let Some(ticket) = tables.tickets.find(|t| t.id == ticket_id) else {
            return Ok(None);
        };

        let Some(ticket_type) = tables.ticket_types.find(|t| t.id == ticket.ticket_type_id) else {
            return Ok(None);
        };

        Ok(Some(TicketWithType {
            ticket,
            ticket_type,
        }))
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn find_by_ticket_id(&self, ticket_id: Id) -> Result<Option<Payment>> {
        Ok(self.read()?.payments.find(|p| p.ticket_id == ticket_id))
    }
}

#[async_trait]
impl HotelRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Option<Vec<Hotel>>> {
        Ok(Some(self.read()?.hotels.rows.clone()))
    }

    async fn find_with_rooms(&self, hotel_id: Id) -> Result<Option<HotelWithRooms>> {
        let tables = self.read()?;

        Ok(tables.hotels.find(|h| h.id == hotel_id).map(|hotel| {
            let rooms = tables.rooms.filter(|r| r.hotel_id == hotel.id);
            HotelWithRooms { hotel, rooms }
        }))
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.read()?.sessions.find(|s| s.token == token))
    }
}
