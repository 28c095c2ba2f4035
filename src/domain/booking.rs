use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::id::{MovieId, TheaterId};
use crate::domain::seat::Seat;

/// Identifier of a successful reservation. Dense, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable record of one successful reservation: which seats were taken
/// together, and for which screening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub movie: MovieId,
    pub theater: TheaterId,
    pub seats: Vec<Seat>,
}

#[derive(Debug)]
struct LogInner {
    /// Next id to hand out. Ids are never given to failed reservations, so
    /// the sequence stays gap-free.
    next_id: AtomicU64,

    records: RwLock<HashMap<BookingId, Arc<Booking>>>,
}

/// Append-only archive of all bookings in the process.
#[derive(Debug, Clone)]
pub struct BookingLog {
    inner: Arc<LogInner>,
}

impl BookingLog {
    pub fn new() -> Self {
        Self { inner: Arc::new(LogInner { next_id: AtomicU64::new(1), records: RwLock::new(HashMap::new()) }) }
    }

    /// Claims the next booking id. Relaxed is enough: ordering between
    /// bookings is established by the seat compare-exchange that must have
    /// already succeeded, not by the counter.
    pub fn allocate_id(&self) -> BookingId {
        BookingId(self.inner.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Archives a booking and returns the shared handle to it.
    pub fn append(&self, booking: Booking) -> Arc<Booking> {
        let record = Arc::new(booking);
        let mut guard = self.inner.records.write().expect("RwLock poisoned");
        guard.insert(record.id, record.clone());
        record
    }

    pub fn lookup(&self, id: BookingId) -> Option<Arc<Booking>> {
        let guard = self.inner.records.read().expect("RwLock poisoned");
        guard.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.records.read().expect("RwLock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BookingLog {
    fn default() -> Self {
        Self::new()
    }
}
