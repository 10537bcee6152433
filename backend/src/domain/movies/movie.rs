//! Movie record, its identifier, and the validated inputs that build it.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::Genre;

/// Rate assigned when a create payload omits one.
pub const DEFAULT_RATE: f64 = 5.0;

/// Raised when a movie identifier is blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyMovieIdError;

impl fmt::Display for EmptyMovieIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "movie id must not be empty")
    }
}

impl std::error::Error for EmptyMovieIdError {}

/// Opaque movie identifier.
///
/// Newly created movies receive a UUIDv4 string. Seeded records may carry any
/// non-blank text, so the value is never parsed as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MovieId(String);

impl MovieId {
    /// Validate and construct a [`MovieId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, EmptyMovieIdError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_owned(id: String) -> Result<Self, EmptyMovieIdError> {
        if id.trim().is_empty() {
            return Err(EmptyMovieIdError);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for MovieId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<MovieId> for String {
    fn from(value: MovieId) -> Self {
        value.0
    }
}

impl TryFrom<String> for MovieId {
    type Error = EmptyMovieIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Fully validated movie fields awaiting an identifier.
///
/// Only [`super::MovieValidator`] produces drafts, so every draft satisfies the
/// field constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDraft {
    pub(crate) title: String,
    pub(crate) year: i32,
    pub(crate) director: String,
    pub(crate) duration: u32,
    pub(crate) rate: f64,
    pub(crate) poster: String,
    pub(crate) genre: Vec<Genre>,
}

impl MovieDraft {
    /// Title of the draft.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Rate of the draft, already defaulted when the payload omitted it.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

/// Validated subset of movie fields used by partial updates.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub(crate) title: Option<String>,
    pub(crate) year: Option<i32>,
    pub(crate) director: Option<String>,
    pub(crate) duration: Option<u32>,
    pub(crate) rate: Option<f64>,
    pub(crate) poster: Option<String>,
    pub(crate) genre: Option<Vec<Genre>>,
}

impl MoviePatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A movie held by the collection.
///
/// ## Invariants
/// - `title` is non-empty.
/// - `year` lies between 1900 and the year the record was validated.
/// - `duration` is positive and `rate` is at most 10.
/// - `poster` parses as an absolute URL.
/// - `genre` holds at least one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    id: MovieId,
    title: String,
    year: i32,
    director: String,
    duration: u32,
    poster: String,
    genre: Vec<Genre>,
    #[serde(serialize_with = "serialize_rate")]
    rate: f64,
}

impl Movie {
    /// Assign an identifier to a validated draft.
    pub fn new(id: MovieId, draft: MovieDraft) -> Self {
        let MovieDraft {
            title,
            year,
            director,
            duration,
            rate,
            poster,
            genre,
        } = draft;
        Self {
            id,
            title,
            year,
            director,
            duration,
            poster,
            genre,
            rate,
        }
    }

    /// Stable identifier assigned at creation.
    pub fn id(&self) -> &MovieId {
        &self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Release year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Credited director.
    pub fn director(&self) -> &str {
        self.director.as_str()
    }

    /// Running time in minutes.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Audience rating out of 10.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Poster image URL.
    pub fn poster(&self) -> &str {
        self.poster.as_str()
    }

    /// Genres in the order they were supplied.
    pub fn genre(&self) -> &[Genre] {
        self.genre.as_slice()
    }

    /// Whether any genre matches `filter` case-insensitively.
    pub fn has_genre(&self, filter: &str) -> bool {
        self.genre.iter().any(|genre| genre.matches_filter(filter))
    }

    /// Overwrite the fields present in `patch`. The identifier never changes.
    pub fn apply(&mut self, patch: &MoviePatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(director) = &patch.director {
            self.director.clone_from(director);
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
        if let Some(poster) = &patch.poster {
            self.poster.clone_from(poster);
        }
        if let Some(genre) = &patch.genre {
            self.genre.clone_from(genre);
        }
    }
}

/// Serialise a rating as an integer when it has no fractional part.
///
/// Clients see `5` rather than `5.0`. Values outside the range where `f64`
/// represents every integer exactly keep their float form.
#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde's serialize_with passes fields by reference"
)]
pub(crate) fn serialize_rate<S: Serializer>(rate: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;
    if rate.is_finite() && rate.fract() == 0.0 && rate.abs() <= EXACT_LIMIT {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "whole values within the exact range convert losslessly"
        )]
        let whole = *rate as i64;
        serializer.serialize_i64(whole)
    } else {
        serializer.serialize_f64(*rate)
    }
}
