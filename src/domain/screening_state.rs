use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use crate::domain::seat::{ALL_SEATS_MASK, FULL_HOUSE, SEAT_COUNT, Seat};

/// Upper bound on CAS retries before a reservation attempt gives up.
const RETRY_CAP: u32 = 100;

/// Base back-off unit between CAS retries; attempt `n` sleeps `n` of these.
const BACKOFF_STEP: Duration = Duration::from_nanos(50);

/// Occupancy of a single screening.
///
/// One 32-bit word carries the whole room: bit `N-1` set means seat `aN` is
/// taken, bits 20..31 always stay zero. Bits only ever flip from free to
/// taken, there is no release, and every mutation goes through a
/// compare-exchange rather than a lock.
#[derive(Debug, Default)]
pub struct ScreeningState {
    occupied: AtomicU32,
}

impl ScreeningState {
    pub fn new() -> Self {
        ScreeningState { occupied: AtomicU32::new(0) }
    }

    /// Atomically claims every seat bit in `mask`, all-or-nothing.
    ///
    /// Returns `true` when all requested bits transitioned 0 -> 1 in one
    /// compare-exchange; from that instant every other thread sees the whole
    /// set as taken. Returns `false` without touching the word when any
    /// requested seat is already occupied, or when the retry cap is reached
    /// under contention.
    ///
    /// Bits outside the seat range must be zero in `mask`.
    pub fn try_reserve(&self, mask: u32) -> bool {
        debug_assert_eq!(mask & !ALL_SEATS_MASK, 0, "mask carries non-seat bits");

        let mut retry = 0;
        loop {
            let current = self.occupied.load(Ordering::Acquire);
            if current & mask != 0 {
                // Somebody holds at least one of the requested seats. Not a
                // transient condition, so no retry.
                return false;
            }

            // The weak variant may fail spuriously; that just re-enters the
            // loop like a genuine lost race.
            match self.occupied.compare_exchange_weak(current, current | mask, Ordering::Release, Ordering::Acquire) {
                Ok(_) => return true,
                Err(_) => {
                    if retry >= RETRY_CAP {
                        return false;
                    }
                    thread::yield_now();
                    thread::sleep(BACKOFF_STEP * (retry + 1));
                    retry += 1;
                }
            }
        }
    }

    /// Snapshot check: no seat bit of `mask` is currently taken. The answer
    /// can be stale by the time the caller acts on it.
    pub fn is_available(&self, mask: u32) -> bool {
        self.occupied.load(Ordering::Acquire) & mask == 0
    }

    /// All currently free seats in ascending order, from one load.
    pub fn available_seats(&self) -> Vec<Seat> {
        let current = self.occupied.load(Ordering::Acquire);
        FULL_HOUSE.iter().copied().filter(|seat| current & seat.mask() == 0).collect()
    }

    /// Number of free seats, `0..=20`.
    pub fn available_count(&self) -> u32 {
        SEAT_COUNT - (self.occupied.load(Ordering::Acquire) & ALL_SEATS_MASK).count_ones()
    }

    /// Share of the room that is taken, in percent.
    pub fn occupancy_percent(&self) -> f64 {
        (SEAT_COUNT - self.available_count()) as f64 * 100.0 / SEAT_COUNT as f64
    }

    /// Raw occupancy word, acquire-loaded.
    pub fn occupied_snapshot(&self) -> u32 {
        self.occupied.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seat::build_mask;

    #[test]
    fn empty_room_is_fully_available() {
        let state = ScreeningState::new();
        assert_eq!(state.available_count(), 20);
        assert_eq!(state.available_seats().len(), 20);
        assert_eq!(state.occupancy_percent(), 0.0);
        assert!(state.is_available(ALL_SEATS_MASK));
    }

    #[test]
    fn reserve_is_all_or_nothing() {
        let state = ScreeningState::new();
        assert!(state.try_reserve(build_mask(&["a1", "a2", "a3"])));

        // a3 is taken, so the batch containing it must leave a4 free too.
        assert!(!state.try_reserve(build_mask(&["a3", "a4"])));
        assert_eq!(state.available_count(), 17);
        assert!(state.is_available(build_mask(&["a4"])));

        assert!(state.try_reserve(build_mask(&["a4"])));
        assert_eq!(state.available_count(), 16);
    }

    #[test]
    fn reserved_seats_disappear_from_the_listing() {
        let state = ScreeningState::new();
        assert!(state.try_reserve(build_mask(&["a1", "a20"])));

        let free: Vec<String> = state.available_seats().iter().map(Seat::to_string).collect();
        assert_eq!(free.len(), 18);
        assert!(!free.contains(&"a1".to_string()));
        assert!(!free.contains(&"a20".to_string()));
        assert_eq!(free.first().map(String::as_str), Some("a2"));
    }

    #[test]
    fn filling_the_room_caps_at_twenty() {
        let state = ScreeningState::new();
        for number in 1..=20u32 {
            assert!(state.try_reserve(build_mask(&[format!("a{}", number)])));
        }
        assert_eq!(state.available_count(), 0);
        assert_eq!(state.occupancy_percent(), 100.0);
        assert!(!state.try_reserve(build_mask(&["a13"])));
    }

    #[test]
    fn occupancy_word_never_leaks_above_bit_nineteen() {
        let state = ScreeningState::new();
        state.try_reserve(build_mask(&["a1", "a10", "a20"]));
        assert_eq!(state.occupied_snapshot() & !ALL_SEATS_MASK, 0);
    }
}
