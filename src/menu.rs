use std::io::{self, BufRead, Write};

use colored::Colorize;

use cinema_reservations::domain::service::BookingService;

type StdinLines = io::Lines<io::StdinLock<'static>>;

/// Runs the interactive menu until the user quits or stdin closes.
///
/// The menu is a thin driver: every action maps to exactly one service
/// call, and all reservation rules live behind that call.
pub fn run(service: &BookingService) {
    let mut lines = io::stdin().lock().lines();

    loop {
        print_menu();
        let Some(choice) = next_line(&mut lines) else { break };
        match choice.trim() {
            "1" => list_movies(service),
            "2" => list_theaters(service, &mut lines),
            "3" => show_availability(service, &mut lines),
            "4" => reserve_seats(service, &mut lines),
            "5" => show_booking(service, &mut lines),
            "6" | "q" | "quit" => break,
            "" => continue,
            other => println!("{}", format!("Unknown option '{}'.", other).red()),
        }
    }

    println!("Goodbye. {} booking(s) were made this session.", service.booking_count());
}

fn print_menu() {
    println!();
    println!("--- Seat Reservations ---");
    println!(" 1) List movies");
    println!(" 2) List theaters for a movie");
    println!(" 3) Show seat availability");
    println!(" 4) Reserve seats");
    println!(" 5) Look up a booking");
    println!(" 6) Quit");
    print!("> ");
    let _ = io::stdout().flush();
}

fn next_line(lines: &mut StdinLines) -> Option<String> {
    lines.next()?.ok()
}

fn prompt(label: &str, lines: &mut StdinLines) -> Option<String> {
    print!("{}: ", label);
    let _ = io::stdout().flush();
    next_line(lines)
}

fn prompt_id(label: &str, lines: &mut StdinLines) -> Option<u32> {
    let input = prompt(label, lines)?;
    match input.trim().parse::<u32>() {
        Ok(id) => Some(id),
        Err(_) => {
            println!("{}", format!("'{}' is not a numeric id.", input.trim()).red());
            None
        }
    }
}

fn list_movies(service: &BookingService) {
    let movies = service.all_movies();
    if movies.is_empty() {
        println!("The catalog is empty.");
        return;
    }
    for movie in movies {
        println!("  [{}] {}", movie.id, movie.title);
    }
}

fn list_theaters(service: &BookingService, lines: &mut StdinLines) {
    let Some(movie) = prompt_id("Movie id", lines) else { return };
    let theaters = service.theaters_for(movie);
    if theaters.is_empty() {
        println!("No theater is showing movie {}.", movie);
        return;
    }
    for theater in theaters {
        println!("  [{}] {}", theater.id, theater.name);
    }
}

fn show_availability(service: &BookingService, lines: &mut StdinLines) {
    let Some(movie) = prompt_id("Movie id", lines) else { return };
    let Some(theater) = prompt_id("Theater id", lines) else { return };

    let free = service.available_seats(movie, theater);
    let listing: Vec<String> = free.iter().map(|seat| seat.to_string()).collect();
    println!("Free seats: {}", if listing.is_empty() { "none".to_string() } else { listing.join(", ") });
    println!(
        "{} of 20 seats free, {:.0}% occupied",
        service.available_count(movie, theater),
        service.occupancy_percent(movie, theater)
    );
}

fn reserve_seats(service: &BookingService, lines: &mut StdinLines) {
    let Some(movie) = prompt_id("Movie id", lines) else { return };
    let Some(theater) = prompt_id("Theater id", lines) else { return };
    let Some(input) = prompt("Seats (e.g. a1 a2 a3)", lines) else { return };

    let seats: Vec<&str> = input.split([' ', ',']).filter(|token| !token.is_empty()).collect();
    match service.reserve(movie, theater, &seats) {
        Ok(booking) => {
            let taken: Vec<String> = booking.seats.iter().map(|seat| seat.to_string()).collect();
            println!("{}", format!("Booking #{} confirmed: {}", booking.id, taken.join(", ")).green());
        }
        Err(e) => println!("{}", format!("Reservation failed: {}", e).red()),
    }
}

fn show_booking(service: &BookingService, lines: &mut StdinLines) {
    let Some(id) = prompt("Booking id", lines).and_then(|input| input.trim().parse::<u64>().ok()) else {
        println!("{}", "Booking ids are numeric.".red());
        return;
    };

    match service.get_booking(id) {
        Some(booking) => {
            let seats: Vec<String> = booking.seats.iter().map(|seat| seat.to_string()).collect();
            println!("Booking #{}: movie {}, theater {}, seats {}", booking.id, booking.movie, booking.theater, seats.join(", "));
        }
        None => println!("No booking with id {}.", id),
    }
}
