use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::id::{MovieId, TheaterId};
use crate::error::{Error, Result};

/// A movie known to the catalog. Immutable once added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

/// A theater known to the catalog. Immutable once added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theater {
    pub id: TheaterId,
    pub name: String,
}

#[derive(Debug, Default)]
struct CatalogInner {
    movies: HashMap<MovieId, Arc<Movie>>,
    theaters: HashMap<TheaterId, Arc<Theater>>,

    /// Theater ids showing each movie, in link insertion order. Kept
    /// duplicate-free, so listings never repeat a theater.
    links: HashMap<MovieId, Vec<TheaterId>>,
}

/// Movies, theaters and the movie-to-theaters linkage.
///
/// Reads hand out `Arc` clones, never references tied to the internal lock.
#[derive(Debug, Clone)]
pub struct MetadataCatalog {
    /// All three maps are protected with a single lock.
    inner: Arc<RwLock<CatalogInner>>,
}

impl MetadataCatalog {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(CatalogInner::default())) }
    }

    /// Adds a movie. Re-adding an existing id replaces its record; links and
    /// screening occupancy are keyed by id and stay as they are.
    pub fn add_movie(&self, id: MovieId, title: impl Into<String>) {
        let movie = Arc::new(Movie { id, title: title.into() });
        let mut guard = self.inner.write().expect("RwLock poisoned");
        if guard.movies.insert(id, movie).is_some() {
            log::debug!("movie {} replaced in the catalog", id);
        }
    }

    /// Adds a theater. Same replacement rule as [`MetadataCatalog::add_movie`].
    pub fn add_theater(&self, id: TheaterId, name: impl Into<String>) {
        let theater = Arc::new(Theater { id, name: name.into() });
        let mut guard = self.inner.write().expect("RwLock poisoned");
        if guard.theaters.insert(id, theater).is_some() {
            log::debug!("theater {} replaced in the catalog", id);
        }
    }

    /// Records that `movie` is shown in `theater`. Returns `false` when
    /// either id is unknown. Linking an already-linked pair is a no-op.
    pub fn link(&self, movie: MovieId, theater: TheaterId) -> bool {
        let mut guard = self.inner.write().expect("RwLock poisoned");
        if !guard.movies.contains_key(&movie) || !guard.theaters.contains_key(&theater) {
            return false;
        }

        let showing_in = guard.links.entry(movie).or_default();
        if !showing_in.contains(&theater) {
            showing_in.push(theater);
        }
        true
    }

    pub fn get_movie(&self, id: MovieId) -> Option<Arc<Movie>> {
        let guard = self.inner.read().expect("RwLock poisoned");
        guard.movies.get(&id).cloned()
    }

    pub fn get_theater(&self, id: TheaterId) -> Option<Arc<Theater>> {
        let guard = self.inner.read().expect("RwLock poisoned");
        guard.theaters.get(&id).cloned()
    }

    /// Every movie in the catalog, sorted by id.
    pub fn all_movies(&self) -> Vec<Arc<Movie>> {
        let guard = self.inner.read().expect("RwLock poisoned");
        let mut movies: Vec<Arc<Movie>> = guard.movies.values().cloned().collect();
        movies.sort_by_key(|movie| movie.id);
        movies
    }

    /// Theaters showing `movie`, in the order the links were added,
    /// filtered to theaters the catalog still knows.
    pub fn theaters_for(&self, movie: MovieId) -> Vec<Arc<Theater>> {
        let guard = self.inner.read().expect("RwLock poisoned");
        match guard.links.get(&movie) {
            Some(showing_in) => showing_in.iter().filter_map(|id| guard.theaters.get(id).cloned()).collect(),
            None => Vec::new(),
        }
    }

    pub fn is_linked(&self, movie: MovieId, theater: TheaterId) -> bool {
        let guard = self.inner.read().expect("RwLock poisoned");
        guard.links.get(&movie).is_some_and(|showing_in| showing_in.contains(&theater))
    }

    /// Validates a reservation target under one shared read: both ids must
    /// exist and the pair must be linked.
    pub fn check_screening(&self, movie: MovieId, theater: TheaterId) -> Result<()> {
        let guard = self.inner.read().expect("RwLock poisoned");
        if !guard.movies.contains_key(&movie) {
            return Err(Error::UnknownMovie(movie.id));
        }
        if !guard.theaters.contains_key(&theater) {
            return Err(Error::UnknownTheater(theater.id));
        }
        let linked = guard.links.get(&movie).is_some_and(|showing_in| showing_in.contains(&theater));
        if !linked {
            return Err(Error::UnlinkedPair(movie.id, theater.id));
        }
        Ok(())
    }
}

impl Default for MetadataCatalog {
    fn default() -> Self {
        Self::new()
    }
}
