use crate::domain::service::BookingService;
use crate::error::Result;
use crate::loader::seed::{apply_seed, load_seed};

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Initializes logging, loads the seed catalog and returns a ready service.
///
/// This is the front-end entry point; library users that manage their own
/// logging and data can construct [`BookingService`] directly instead.
pub fn bootstrap(seed_path: &str) -> Result<BookingService> {
    logger::init();
    log::info!("Logger initialized. Loading seed catalog from '{}'.", seed_path);

    let seed = load_seed(seed_path)?;
    log::info!("Seed catalog parsed successfully.");

    let service = BookingService::new();
    apply_seed(&service, &seed);
    log::info!("Booking service ready.");

    Ok(service)
}
