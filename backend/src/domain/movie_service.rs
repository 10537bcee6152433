//! Movie catalogue domain service.
//!
//! Implements both movie driving ports on top of a [`MovieRepository`]:
//! validate the payload, run one repository step, and translate the outcome
//! into the domain error envelope.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, PageSize};
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CreateMovieRequest, DeleteMovieRequest, DeleteMovieResponse, GetMovieRequest,
    ListMoviesRequest, MovieCommand, MovieQuery, MovieRepository, MovieRepositoryError,
    MovieResponse, MoviesResponse, PageMoviesRequest, UpdateMovieRequest,
};
use crate::domain::{Error, Movie, MovieId, MovieValidationErrors, MovieValidator};

/// Message returned when no movie matches an identifier.
pub const MOVIE_NOT_FOUND: &str = "Movie not Found";
/// Message returned when a payload fails schema checks.
pub const MOVIE_VALIDATION_FAILED: &str = "Movie payload failed validation";

fn map_repository_error(error: MovieRepositoryError) -> Error {
    Error::internal(format!("movie repository error: {error}"))
}

fn map_validation_errors(errors: MovieValidationErrors) -> Error {
    Error::invalid_request(MOVIE_VALIDATION_FAILED).with_field_errors(json!(errors))
}

fn not_found() -> Error {
    Error::not_found(MOVIE_NOT_FOUND)
}

/// Blank identifiers can never match a record, so they resolve to not-found.
fn parse_id(raw: &str) -> Result<MovieId, Error> {
    MovieId::new(raw).map_err(|_| not_found())
}

/// Movie service implementing the query and command driving ports.
#[derive(Clone)]
pub struct MovieService<R> {
    movie_repo: Arc<R>,
    validator: MovieValidator,
    page_size: PageSize,
}

impl<R> MovieService<R> {
    /// Create a service over `movie_repo` serving pages of `page_size`.
    pub fn new(movie_repo: Arc<R>, validator: MovieValidator, page_size: PageSize) -> Self {
        Self {
            movie_repo,
            validator,
            page_size,
        }
    }
}

#[async_trait]
impl<R> MovieQuery for MovieService<R>
where
    R: MovieRepository,
{
    async fn list_movies(&self, request: ListMoviesRequest) -> Result<MoviesResponse, Error> {
        let genre = request.genre.filter(|genre| !genre.is_empty());
        let movies = self
            .movie_repo
            .list(genre)
            .await
            .map_err(map_repository_error)?;
        Ok(MoviesResponse { movies })
    }

    async fn get_movie(&self, request: GetMovieRequest) -> Result<MovieResponse, Error> {
        let id = parse_id(&request.id)?;
        let movie = self
            .movie_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(not_found)?;
        Ok(MovieResponse { movie })
    }

    async fn page_movies(&self, request: PageMoviesRequest) -> Result<MoviesResponse, Error> {
        let page = PageRequest::new(request.page, self.page_size);
        let movies = self
            .movie_repo
            .page(page)
            .await
            .map_err(map_repository_error)?;
        Ok(MoviesResponse { movies })
    }
}

#[async_trait]
impl<R> MovieCommand for MovieService<R>
where
    R: MovieRepository,
{
    async fn create_movie(&self, request: CreateMovieRequest) -> Result<MovieResponse, Error> {
        let draft = self
            .validator
            .validate_full(&request.payload)
            .map_err(map_validation_errors)?;
        let movie = Movie::new(MovieId::random(), draft);

        self.movie_repo
            .insert(movie.clone())
            .await
            .map_err(map_repository_error)?;

        info!(movie_id = %movie.id(), "movie created");
        Ok(MovieResponse { movie })
    }

    async fn update_movie(&self, request: UpdateMovieRequest) -> Result<MovieResponse, Error> {
        let patch = self
            .validator
            .validate_partial(&request.payload)
            .map_err(map_validation_errors)?;
        let id = parse_id(&request.id)?;

        let movie = self
            .movie_repo
            .update(&id, &patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(not_found)?;

        info!(movie_id = %id, "movie updated");
        Ok(MovieResponse { movie })
    }

    async fn delete_movie(
        &self,
        request: DeleteMovieRequest,
    ) -> Result<DeleteMovieResponse, Error> {
        let id = parse_id(&request.id)?;
        let removed = self
            .movie_repo
            .remove(&id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(not_found());
        }

        info!(movie_id = %id, "movie deleted");
        Ok(DeleteMovieResponse { id })
    }
}

#[cfg(test)]
#[path = "movie_service_tests.rs"]
mod tests;
