//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{MovieCommand, MovieQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub movies: Arc<dyn MovieCommand>,
    pub movies_query: Arc<dyn MovieQuery>,
}

impl HttpState {
    /// Construct state from the movie ports.
    ///
    /// A single service usually backs both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{MovieService, MovieValidator};
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryMovieRepository;
    /// use mockable::DefaultClock;
    /// use pagination::PageSize;
    ///
    /// let validator = MovieValidator::new(Arc::new(DefaultClock));
    /// let repository = Arc::new(InMemoryMovieRepository::default());
    /// let service = Arc::new(MovieService::new(repository, validator, PageSize::DEFAULT));
    /// let state = HttpState::new(service.clone(), service);
    /// let _movies = state.movies.clone();
    /// ```
    pub fn new(movies: Arc<dyn MovieCommand>, movies_query: Arc<dyn MovieQuery>) -> Self {
        Self {
            movies,
            movies_query,
        }
    }
}
