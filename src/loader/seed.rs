use std::fs;

use crate::api::seed_dto::SeedDto;
use crate::domain::service::BookingService;
use crate::error::Result;

/// Reads and parses the JSON seed catalog at `file_path`.
///
/// Errors are converted into `crate::error::Error` variants:
/// - `Error::Io` if the file cannot be read.
/// - `Error::Deserialization` if the JSON is malformed.
pub fn load_seed(file_path: &str) -> Result<SeedDto> {
    let data = fs::read_to_string(file_path)?;
    let seed: SeedDto = serde_json::from_str(&data)?;
    Ok(seed)
}

/// Populates the service catalog from a parsed seed.
///
/// A link naming an id the seed never declared is skipped with a warning
/// rather than aborting the whole seed.
pub fn apply_seed(service: &BookingService, seed: &SeedDto) {
    for movie in &seed.movies {
        service.add_movie(movie.id, &movie.title);
    }
    for theater in &seed.theaters {
        service.add_theater(theater.id, &theater.name);
    }

    for link in &seed.links {
        for theater_id in &link.theater_ids {
            if !service.link(link.movie_id, *theater_id) {
                log::warn!("seed links movie {} to unknown id {}; skipped", link.movie_id, theater_id);
            }
        }
    }

    log::info!("seeded {} movie(s) and {} theater(s)", seed.movies.len(), seed.theaters.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "movies":   [ { "id": 1, "title": "Metropolis" }, { "id": 2, "title": "Stalker" } ],
        "theaters": [ { "id": 1, "name": "Grand Hall" } ],
        "links":    [ { "movieId": 1, "theaterIds": [1, 9] }, { "movieId": 2, "theaterIds": [1] } ]
    }"#;

    #[test]
    fn applies_movies_theaters_and_valid_links() {
        let seed: SeedDto = serde_json::from_str(SEED).expect("seed fixture must parse");
        let service = BookingService::new();
        apply_seed(&service, &seed);

        assert_eq!(service.all_movies().len(), 2);
        assert!(service.is_linked(1, 1));
        assert!(service.is_linked(2, 1));
        // The link to the undeclared theater 9 is dropped.
        assert_eq!(service.theaters_for(1).len(), 1);
    }

    #[test]
    fn malformed_seed_surfaces_a_deserialization_error() {
        let err = serde_json::from_str::<SeedDto>("{ \"movies\": 7 }").unwrap_err();
        let err: crate::error::Error = err.into();
        assert!(matches!(err, crate::error::Error::Deserialization(_)));
    }
}
