//! Driving port for movie read operations.

use async_trait::async_trait;
use pagination::PageNumber;

use crate::domain::{Error, Movie};

/// Request to list movies, optionally filtered by genre.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListMoviesRequest {
    /// Case-insensitive genre name. Blank values select every movie.
    pub genre: Option<String>,
}

/// Movies matching a list or page request, in collection order.
#[derive(Debug, Clone, PartialEq)]
pub struct MoviesResponse {
    pub movies: Vec<Movie>,
}

/// Request to fetch one movie. The identifier is taken verbatim from the
/// caller and resolves to not-found when it matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetMovieRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieResponse {
    pub movie: Movie,
}

/// Request for one fixed-size page of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMoviesRequest {
    pub page: PageNumber,
}

/// Driving port for movie queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieQuery: Send + Sync {
    /// Every movie in collection order, narrowed by the optional genre filter.
    async fn list_movies(&self, request: ListMoviesRequest) -> Result<MoviesResponse, Error>;

    /// Fails with [`crate::domain::ErrorCode::NotFound`] when no movie has the id.
    async fn get_movie(&self, request: GetMovieRequest) -> Result<MovieResponse, Error>;

    /// Pages outside the collection produce an empty list rather than an error.
    async fn page_movies(&self, request: PageMoviesRequest) -> Result<MoviesResponse, Error>;
}
