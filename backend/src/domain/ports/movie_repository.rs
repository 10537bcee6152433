//! Driven port for movie storage.
//!
//! Adapters own the ordered collection. Each method is a single atomic step
//! against it, so an update's find-merge-replace never interleaves with
//! another mutation.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Movie, MovieId, MoviePatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised by movie repository adapters.
    pub enum MovieRepositoryError {
        /// The identifier is already taken by another record.
        DuplicateId { id: String } =>
            "movie repository already holds id {id}",
    }
}

/// Port for reading and mutating the movie collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Every movie in collection order, optionally narrowed to a genre.
    async fn list(&self, genre: Option<String>) -> Result<Vec<Movie>, MovieRepositoryError>;

    /// Find a movie by exact identifier.
    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieRepositoryError>;

    /// Append a movie to the end of the collection.
    async fn insert(&self, movie: Movie) -> Result<(), MovieRepositoryError>;

    /// Merge `patch` into the stored movie, returning the merged record or
    /// `None` when no movie has `id`.
    async fn update(
        &self,
        id: &MovieId,
        patch: &MoviePatch,
    ) -> Result<Option<Movie>, MovieRepositoryError>;

    /// Remove a movie, returning whether it existed.
    async fn remove(&self, id: &MovieId) -> Result<bool, MovieRepositoryError>;

    /// Movies on one page of the collection.
    async fn page(&self, request: PageRequest) -> Result<Vec<Movie>, MovieRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_id_names_the_taken_identifier() {
        let err = MovieRepositoryError::duplicate_id("abc");
        assert_eq!(err.to_string(), "movie repository already holds id abc");
    }
}
