use std::sync::Arc;

use crate::domain::booking::{Booking, BookingId, BookingLog};
use crate::domain::catalog::{MetadataCatalog, Movie, Theater};
use crate::domain::id::{MovieId, TheaterId};
use crate::domain::screening_registry::ScreeningRegistry;
use crate::domain::seat::{FULL_HOUSE, SEAT_COUNT, Seat};
use crate::error::{Error, Result};

/// Facade over the catalog, the screening registry and the booking log.
///
/// This is the only write path into the system: it validates a request,
/// routes it to the right screening state, and records the booking after
/// the seats have actually been won. All read operations are lock-light
/// snapshots and never create screening state.
#[derive(Debug, Clone)]
pub struct BookingService {
    catalog: MetadataCatalog,
    registry: ScreeningRegistry,
    log: BookingLog,
}

impl BookingService {
    pub fn new() -> Self {
        Self { catalog: MetadataCatalog::new(), registry: ScreeningRegistry::new(), log: BookingLog::new() }
    }

    //------------------------
    // --- Catalog surface ---
    //------------------------

    /// Adds a movie; re-adding an id replaces its title.
    pub fn add_movie(&self, id: u32, title: impl Into<String>) {
        self.catalog.add_movie(MovieId::new(id), title);
    }

    /// Adds a theater; re-adding an id replaces its name.
    pub fn add_theater(&self, id: u32, name: impl Into<String>) {
        self.catalog.add_theater(TheaterId::new(id), name);
    }

    /// Records that the movie is shown in the theater. `false` when either
    /// id is unknown.
    pub fn link(&self, movie: u32, theater: u32) -> bool {
        self.catalog.link(MovieId::new(movie), TheaterId::new(theater))
    }

    pub fn all_movies(&self) -> Vec<Arc<Movie>> {
        self.catalog.all_movies()
    }

    pub fn get_movie(&self, id: u32) -> Option<Arc<Movie>> {
        self.catalog.get_movie(MovieId::new(id))
    }

    pub fn theaters_for(&self, movie: u32) -> Vec<Arc<Theater>> {
        self.catalog.theaters_for(MovieId::new(movie))
    }

    pub fn is_linked(&self, movie: u32, theater: u32) -> bool {
        self.catalog.is_linked(MovieId::new(movie), TheaterId::new(theater))
    }

    //-----------------------------
    // --- Availability surface ---
    //-----------------------------

    /// Free seats of the screening in ascending order. A pair nobody has
    /// reserved for yet is fully free; no state is created to answer.
    pub fn available_seats(&self, movie: u32, theater: u32) -> Vec<Seat> {
        match self.registry.lookup((MovieId::new(movie), TheaterId::new(theater))) {
            Some(state) => state.available_seats(),
            None => FULL_HOUSE.clone(),
        }
    }

    /// Number of free seats, `0..=20`.
    pub fn available_count(&self, movie: u32, theater: u32) -> u32 {
        match self.registry.lookup((MovieId::new(movie), TheaterId::new(theater))) {
            Some(state) => state.available_count(),
            None => SEAT_COUNT,
        }
    }

    /// Share of the screening that is taken, in percent.
    pub fn occupancy_percent(&self, movie: u32, theater: u32) -> f64 {
        match self.registry.lookup((MovieId::new(movie), TheaterId::new(theater))) {
            Some(state) => state.occupancy_percent(),
            None => 0.0,
        }
    }

    //-----------------------------
    // --- Reservation surface ---
    //-----------------------------

    /// Reserves `seats` for the screening, all-or-nothing.
    ///
    /// On success the returned booking's seats were claimed in a single
    /// atomic step and its id was allocated strictly after that step. On
    /// any error nothing happened: no seat bit was set, no id was spent,
    /// nothing was logged.
    pub fn reserve<S: AsRef<str>>(&self, movie: u32, theater: u32, seats: &[S]) -> Result<Arc<Booking>> {
        if seats.is_empty() {
            return Err(Error::EmptySeatList);
        }

        let mut parsed = Vec::with_capacity(seats.len());
        for id in seats {
            match Seat::parse(id.as_ref()) {
                Some(seat) => parsed.push(seat),
                None => return Err(Error::InvalidSeatId(id.as_ref().to_string())),
            }
        }
        // A request may name the same seat twice; it is still one seat.
        parsed.sort_unstable();
        parsed.dedup();

        let movie_id = MovieId::new(movie);
        let theater_id = TheaterId::new(theater);
        self.catalog.check_screening(movie_id, theater_id)?;

        let mask = parsed.iter().fold(0u32, |mask, seat| mask | seat.mask());
        if mask == 0 {
            // Unreachable after the parse above.
            return Err(Error::EmptySeatList);
        }

        let state = self.registry.get_or_create((movie_id, theater_id));
        if !state.try_reserve(mask) {
            // A still-free mask means the retry cap ran out under
            // contention rather than an actual overlap.
            let kind = if state.is_available(mask) { Error::Contention } else { Error::SeatsUnavailable };
            log::info!("reservation for movie {} / theater {} failed: {}", movie, theater, kind);
            return Err(kind);
        }

        let id = self.log.allocate_id();
        let booking = self.log.append(Booking { id, movie: movie_id, theater: theater_id, seats: parsed });
        log::info!(
            "booking {} confirmed for movie {} / theater {}: {} seat(s), {} left",
            booking.id,
            movie,
            theater,
            booking.seats.len(),
            state.available_count()
        );

        Ok(booking)
    }

    pub fn get_booking(&self, id: u64) -> Option<Arc<Booking>> {
        self.log.lookup(BookingId(id))
    }

    /// Number of successful reservations so far.
    pub fn booking_count(&self) -> usize {
        self.log.len()
    }
}

impl Default for BookingService {
    fn default() -> Self {
        Self::new()
    }
}
