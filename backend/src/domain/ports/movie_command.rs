//! Driving port for movie mutations.
//!
//! Payloads arrive as raw JSON so the domain validator can report every
//! failing field with its own message.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, MovieId};

use super::MovieResponse;

/// Request to create a movie from a full payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMovieRequest {
    pub payload: Value,
}

/// Request to merge a partial payload into an existing movie.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateMovieRequest {
    pub id: String,
    pub payload: Value,
}

/// Request to delete a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteMovieRequest {
    pub id: String,
}

/// Identifier of the movie that was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteMovieResponse {
    pub id: MovieId,
}

/// Driving port for movie writes.
///
/// Validation failures surface as [`crate::domain::ErrorCode::InvalidRequest`]
/// with per-field details; unknown ids surface as
/// [`crate::domain::ErrorCode::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCommand: Send + Sync {
    /// Validate, assign a fresh id, and append the movie.
    async fn create_movie(&self, request: CreateMovieRequest) -> Result<MovieResponse, Error>;

    /// Validate the present fields and merge them over the stored movie.
    async fn update_movie(&self, request: UpdateMovieRequest) -> Result<MovieResponse, Error>;

    async fn delete_movie(
        &self,
        request: DeleteMovieRequest,
    ) -> Result<DeleteMovieResponse, Error>;
}
