//! Builders for HTTP state backed by the in-memory movie repository.

use std::sync::Arc;

use actix_web::web;
use backend::domain::{MovieCollection, MovieService, MovieValidator};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryMovieRepository;
use pagination::PageSize;

/// Wire one [`MovieService`] over the seeded repository into both ports.
pub(super) fn build_http_state(
    movies: MovieCollection,
    validator: MovieValidator,
    page_size: PageSize,
) -> web::Data<HttpState> {
    let repository = Arc::new(InMemoryMovieRepository::new(movies));
    let service = Arc::new(MovieService::new(repository, validator, page_size));
    web::Data::new(HttpState::new(service.clone(), service))
}
