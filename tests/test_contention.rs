use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use rand::Rng;
use rand::seq::SliceRandom;

use cinema_reservations::domain::screening_registry::ScreeningRegistry;
use cinema_reservations::domain::seat::ALL_SEATS_MASK;
use cinema_reservations::domain::service::BookingService;
use cinema_reservations::error::Error;

fn single_screening_service() -> Arc<BookingService> {
    let service = BookingService::new();
    service.add_movie(1, "Metropolis");
    service.add_theater(1, "Grand Hall");
    assert!(service.link(1, 1));
    Arc::new(service)
}

#[test]
fn thousand_threads_racing_for_one_seat_produce_one_booking() {
    const THREADS: usize = 1000;
    let service = single_screening_service();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service.reserve(1, 1, &["a1"]).is_ok()
            })
        })
        .collect();

    let successes = handles.into_iter().map(|h| h.join().expect("no thread may panic")).filter(|won| *won).count();

    assert_eq!(successes, 1, "exactly one thread may win the seat");
    assert_eq!(service.available_count(1, 1), 19);
    assert_eq!(service.booking_count(), 1);
    assert_eq!(service.get_booking(1).expect("the one booking has id 1").seats.len(), 1);
}

#[test]
fn thousand_threads_rotating_over_the_row_fill_it_exactly_once() {
    const THREADS: usize = 1000;
    let service = single_screening_service();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            let seat = format!("a{}", i % 20 + 1);
            thread::spawn(move || {
                barrier.wait();
                service.reserve(1, 1, &[seat.as_str()]).ok().map(|booking| booking.seats[0].to_string())
            })
        })
        .collect();

    let won: Vec<String> = handles.into_iter().filter_map(|h| h.join().expect("no thread may panic")).collect();

    assert_eq!(won.len(), 20, "each seat is won exactly once");
    let distinct: HashSet<&String> = won.iter().collect();
    assert_eq!(distinct.len(), 20, "no seat is booked twice");
    for number in 1..=20u32 {
        assert!(distinct.contains(&format!("a{}", number)), "a{} must have a winner", number);
    }

    assert_eq!(service.available_count(1, 1), 0);
    assert_eq!(service.booking_count(), 20);

    // Property 4: ids of the successful reservations are dense on 1..=20.
    for id in 1..=20u64 {
        assert!(service.get_booking(id).is_some(), "booking id {} must exist", id);
    }
    assert!(service.get_booking(21).is_none());
}

#[test]
fn concurrent_get_or_create_yields_a_single_state_per_key() {
    use cinema_reservations::domain::id::{MovieId, TheaterId};

    const THREADS: usize = 64;
    let registry = ScreeningRegistry::new();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = registry.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.get_or_create((MovieId::new(1), TheaterId::new(1)))
            })
        })
        .collect();

    let states: Vec<_> = handles.into_iter().map(|h| h.join().expect("no thread may panic")).collect();

    assert_eq!(registry.len(), 1, "the double-check must prevent double creation");
    for state in &states[1..] {
        assert!(Arc::ptr_eq(&states[0], state), "every caller gets the same handle");
    }

    // A lookup after the creations observes the same state.
    let looked_up = registry.lookup((MovieId::new(1), TheaterId::new(1))).expect("state exists");
    assert!(Arc::ptr_eq(&states[0], &looked_up));
}

#[test]
fn random_batches_never_double_book_and_never_tear() {
    const THREADS: usize = 100;
    const ATTEMPTS_PER_THREAD: usize = 10;

    let service = single_screening_service();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut rng = rand::rng();
                let mut row: Vec<u32> = (1..=20).collect();
                let mut won_masks = Vec::new();

                barrier.wait();
                for _ in 0..ATTEMPTS_PER_THREAD {
                    row.shuffle(&mut rng);
                    let batch: Vec<String> = row[..rng.random_range(1..=3)].iter().map(|n| format!("a{}", n)).collect();

                    match service.reserve(1, 1, &batch) {
                        Ok(booking) => {
                            won_masks.push(booking.seats.iter().fold(0u32, |mask, seat| mask | seat.mask()));
                        }
                        Err(Error::SeatsUnavailable) | Err(Error::Contention) => {}
                        Err(e) => panic!("unexpected reservation error: {}", e),
                    }
                }
                won_masks
            })
        })
        .collect();

    let mut union = 0u32;
    for handle in handles {
        for mask in handle.join().expect("no thread may panic") {
            assert_eq!(union & mask, 0, "a seat was granted to two different bookings");
            union |= mask;
        }
    }

    // The occupancy word is exactly the union of everything granted, and
    // never carries bits beyond the twenty-seat row.
    assert_eq!(union & !ALL_SEATS_MASK, 0);
    let taken = 20 - service.available_count(1, 1);
    assert_eq!(taken, union.count_ones(), "occupancy matches the granted seats");

    // Property 4 across a concurrent run: ids dense on 1..=N.
    let n = service.booking_count() as u64;
    for id in 1..=n {
        assert!(service.get_booking(id).is_some(), "booking id {} must exist", id);
    }
    assert!(service.get_booking(n + 1).is_none());
}

#[test]
fn readers_run_while_writers_contend() {
    const WRITERS: usize = 40;
    let service = single_screening_service();
    let barrier = Arc::new(Barrier::new(WRITERS + 1));

    let writers: Vec<_> = (0..WRITERS)
        .map(|i| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            let seat = format!("a{}", i % 20 + 1);
            thread::spawn(move || {
                barrier.wait();
                let _ = service.reserve(1, 1, &[seat.as_str()]);
            })
        })
        .collect();

    let reader = {
        let service = Arc::clone(&service);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            // Snapshots may be stale but must always be internally sane.
            for _ in 0..1000 {
                assert!(service.available_count(1, 1) <= 20);
                assert!(service.available_seats(1, 1).len() <= 20);
                let percent = service.occupancy_percent(1, 1);
                assert!((0.0..=100.0).contains(&percent));
            }
        })
    };

    for writer in writers {
        writer.join().expect("writer must not panic");
    }
    reader.join().expect("reader must not panic");

    assert_eq!(service.available_count(1, 1), 0, "all twenty seats end up taken");
    assert_eq!(service.booking_count(), 20);
}
