//! Movie catalogue domain types.
//!
//! Payloads enter as raw JSON and leave [`MovieValidator`] as either a
//! [`MovieDraft`], a [`MoviePatch`], or a list of [`FieldIssue`]s. The
//! [`MovieCollection`] owns the ordered records those drafts become.

mod collection;
mod genre;
mod movie;
mod validation;

pub use collection::{DuplicateMovieIdError, MovieCollection};
pub use genre::{Genre, UnknownGenreError};
pub(crate) use movie::serialize_rate;
pub use movie::{DEFAULT_RATE, EmptyMovieIdError, Movie, MovieDraft, MovieId, MoviePatch};
pub use validation::{
    FieldIssue, IssueCode, MAX_RATE, MIN_YEAR, MovieValidationErrors, MovieValidator,
};
