use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Seed file not found or could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed catalog JSON: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("'{0}' is not a seat identifier (expected a1..a20)")]
    InvalidSeatId(String),

    #[error("Reservation request contained no seats")]
    EmptySeatList,

    #[error("Movie {0} is not in the catalog")]
    UnknownMovie(u32),

    #[error("Theater {0} is not in the catalog")]
    UnknownTheater(u32),

    #[error("Movie {0} is not showing in theater {1}")]
    UnlinkedPair(u32, u32),

    #[error("At least one requested seat is already reserved")]
    SeatsUnavailable,

    #[error("Reservation gave up under heavy contention; no seats were taken")]
    Contention,
}

pub type Result<T> = std::result::Result<T, Error>;
