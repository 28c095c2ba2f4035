use clap::Parser;

use cinema_reservations::bootstrap;

mod menu;

/// Interactive seat-reservation front-end for small screening rooms.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the JSON seed catalog.
    #[arg(long, default_value = "data/seed.json")]
    seed: String,
}

fn main() {
    let args = Args::parse();

    match bootstrap(&args.seed) {
        Ok(service) => menu::run(&service),
        Err(e) => {
            log::error!("Start-up failed: {}", e);
            std::process::exit(1);
        }
    }
}
