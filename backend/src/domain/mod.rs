//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the movie catalogue model and the use cases that operate
//! on it, independent of HTTP or storage. Keep types immutable outside the
//! collection and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - TraceId: request-scoped correlation identifier.
//! - Movie, MovieId, Genre: the catalogue record and its parts.
//! - MovieValidator: schema checks for create and patch payloads.
//! - MovieCollection: ordered storage model shared by adapters.
//! - MovieService: implementation of the movie driving ports.

pub mod error;
pub mod movie_service;
pub mod movies;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::movie_service::{MOVIE_NOT_FOUND, MOVIE_VALIDATION_FAILED, MovieService};
pub use self::movies::{
    DEFAULT_RATE, DuplicateMovieIdError, EmptyMovieIdError, FieldIssue, Genre, IssueCode,
    MAX_RATE, MIN_YEAR, Movie, MovieCollection, MovieDraft, MovieId, MoviePatch,
    MovieValidationErrors, MovieValidator, UnknownGenreError,
};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Movie not Found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
