//! Schema checks for incoming movie payloads.
//!
//! Both entry points walk every field and collect one [`FieldIssue`] per
//! failure, so callers can report all problems at once. A missing field and a
//! field of the wrong JSON type produce different messages. JSON `null` is a
//! wrong type, not a missing field.

use std::fmt;
use std::sync::Arc;

use chrono::Datelike;
use mockable::Clock;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use super::{DEFAULT_RATE, Genre, MovieDraft, MoviePatch};

/// Earliest release year accepted for a movie.
pub const MIN_YEAR: i32 = 1900;
/// Highest rate accepted for a movie.
pub const MAX_RATE: f64 = 10.0;

/// Machine-readable reason attached to a [`FieldIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// A required field is absent.
    MissingField,
    /// The value has the wrong JSON type.
    InvalidType,
    /// A required string or array is empty.
    TooSmall,
    /// A number falls outside its allowed range.
    OutOfRange,
    /// The poster is not an absolute URL.
    InvalidUrl,
    /// A genre is not one of the accepted spellings.
    InvalidEnum,
}

/// One failing field in a movie payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    field: &'static str,
    code: IssueCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
}

impl FieldIssue {
    fn new(field: Field, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            field: field.name(),
            code,
            message: message.into(),
            index: None,
        }
    }

    fn missing(field: Field) -> Self {
        Self::new(
            field,
            IssueCode::MissingField,
            format!("Movie {} is required", field.name()),
        )
    }

    fn invalid_type(field: Field) -> Self {
        Self::new(field, IssueCode::InvalidType, field.type_message())
    }

    fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Name of the payload field that failed.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Reason the field was rejected.
    pub fn code(&self) -> IssueCode {
        self.code
    }

    /// Client-facing description of the failure.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Position of the offending element for array fields.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

/// Every issue found in a rejected payload, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MovieValidationErrors(Vec<FieldIssue>);

impl MovieValidationErrors {
    pub fn issues(&self) -> &[FieldIssue] {
        self.0.as_slice()
    }

    /// Whether any issue concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|issue| issue.field == field)
    }
}

impl fmt::Display for MovieValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for issue in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for MovieValidationErrors {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Payload,
    Title,
    Year,
    Director,
    Duration,
    Rate,
    Poster,
    Genre,
}

impl Field {
    const fn name(self) -> &'static str {
        match self {
            Self::Payload => "payload",
            Self::Title => "title",
            Self::Year => "year",
            Self::Director => "director",
            Self::Duration => "duration",
            Self::Rate => "rate",
            Self::Poster => "poster",
            Self::Genre => "genre",
        }
    }

    const fn type_message(self) -> &'static str {
        match self {
            Self::Payload => "Movie payload must be a JSON object",
            Self::Title => "Movie title must be a string",
            Self::Year => "Movie year must be an integer",
            Self::Director => "Movie director must be a string",
            Self::Duration => "Movie duration must be an integer",
            Self::Rate => "Movie rate must be a number",
            Self::Poster => "Movie poster must be a string",
            Self::Genre => GENRE_MESSAGE,
        }
    }
}

const GENRE_MESSAGE: &str = "Movie genre must be an array of enum Genre";

type FieldResult<T> = Result<T, Vec<FieldIssue>>;

fn reject<T>(issue: FieldIssue) -> FieldResult<T> {
    Err(vec![issue])
}

fn record<T>(issues: &mut Vec<FieldIssue>, result: FieldResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(mut found) => {
            issues.append(&mut found);
            None
        }
    }
}

fn required<T>(
    object: &Map<String, Value>,
    field: Field,
    issues: &mut Vec<FieldIssue>,
    check: impl FnOnce(&Value) -> FieldResult<T>,
) -> Option<T> {
    let result = match object.get(field.name()) {
        Some(value) => check(value),
        None => reject(FieldIssue::missing(field)),
    };
    record(issues, result)
}

fn optional<T>(
    object: &Map<String, Value>,
    field: Field,
    issues: &mut Vec<FieldIssue>,
    check: impl FnOnce(&Value) -> FieldResult<T>,
) -> Option<T> {
    let value = object.get(field.name())?;
    record(issues, check(value))
}

/// Integer view of a JSON number. Whole floats such as `120.0` qualify;
/// magnitudes beyond `i64` saturate.
fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(integer) = number.as_i64() {
        return Some(integer);
    }
    if number.as_u64().is_some() {
        return Some(i64::MAX);
    }
    let float = number.as_f64()?;
    (float.fract() == 0.0).then_some(float as i64)
}

fn string(field: Field, value: &Value) -> FieldResult<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        _ => reject(FieldIssue::invalid_type(field)),
    }
}

fn title(value: &Value) -> FieldResult<String> {
    let title = string(Field::Title, value)?;
    if title.is_empty() {
        return reject(FieldIssue::new(
            Field::Title,
            IssueCode::TooSmall,
            "Movie title must not be empty",
        ));
    }
    Ok(title)
}

fn director(value: &Value) -> FieldResult<String> {
    string(Field::Director, value)
}

fn duration(value: &Value) -> FieldResult<u32> {
    let minutes =
        as_integer(value).ok_or_else(|| vec![FieldIssue::invalid_type(Field::Duration)])?;
    u32::try_from(minutes)
        .ok()
        .filter(|minutes| *minutes > 0)
        .ok_or_else(|| {
            vec![FieldIssue::new(
                Field::Duration,
                IssueCode::OutOfRange,
                "Movie duration must be a positive number of minutes",
            )]
        })
}

fn rate(value: &Value) -> FieldResult<f64> {
    let rate = match value {
        Value::Number(number) => number.as_f64(),
        _ => None,
    }
    .ok_or_else(|| vec![FieldIssue::invalid_type(Field::Rate)])?;
    if rate > MAX_RATE {
        return reject(FieldIssue::new(
            Field::Rate,
            IssueCode::OutOfRange,
            "Movie rate must be at most 10",
        ));
    }
    Ok(rate)
}

fn poster(value: &Value) -> FieldResult<String> {
    let poster = string(Field::Poster, value)?;
    if Url::parse(&poster).is_err() {
        return reject(FieldIssue::new(
            Field::Poster,
            IssueCode::InvalidUrl,
            "Poster must be a valid URL",
        ));
    }
    Ok(poster)
}

fn genre(value: &Value) -> FieldResult<Vec<Genre>> {
    let Value::Array(items) = value else {
        return reject(FieldIssue::invalid_type(Field::Genre));
    };
    if items.is_empty() {
        return reject(FieldIssue::new(
            Field::Genre,
            IssueCode::TooSmall,
            "Movie genre must contain at least one value",
        ));
    }

    let mut genres = Vec::with_capacity(items.len());
    let mut issues = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match item.as_str().map(str::parse::<Genre>) {
            Some(Ok(genre)) => genres.push(genre),
            _ => issues.push(
                FieldIssue::new(Field::Genre, IssueCode::InvalidEnum, GENRE_MESSAGE).at(index),
            ),
        }
    }
    if issues.is_empty() {
        Ok(genres)
    } else {
        Err(issues)
    }
}

fn payload_object(payload: &Value) -> Result<&Map<String, Value>, MovieValidationErrors> {
    payload
        .as_object()
        .ok_or_else(|| MovieValidationErrors(vec![FieldIssue::invalid_type(Field::Payload)]))
}

/// Validates movie payloads against the movie schema.
///
/// The upper bound on `year` is the current calendar year read from the
/// injected clock at validation time.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::domain::MovieValidator;
/// use mockable::DefaultClock;
/// use serde_json::json;
///
/// let validator = MovieValidator::new(Arc::new(DefaultClock));
/// let draft = validator
///     .validate_full(&json!({
///         "title": "Heat",
///         "year": 1995,
///         "director": "Michael Mann",
///         "duration": 170,
///         "poster": "https://example.com/heat.jpg",
///         "genre": ["Crime", "Drama"]
///     }))
///     .expect("valid payload");
/// assert_eq!(draft.rate(), 5.0);
/// ```
#[derive(Clone)]
pub struct MovieValidator {
    clock: Arc<dyn Clock>,
}

impl MovieValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn current_year(&self) -> i32 {
        self.clock.utc().year()
    }

    fn year_check(&self) -> impl FnOnce(&Value) -> FieldResult<i32> {
        let max_year = self.current_year();
        move |value| {
            let year =
                as_integer(value).ok_or_else(|| vec![FieldIssue::invalid_type(Field::Year)])?;
            i32::try_from(year)
                .ok()
                .filter(|year| (MIN_YEAR..=max_year).contains(year))
                .ok_or_else(|| {
                    vec![FieldIssue::new(
                        Field::Year,
                        IssueCode::OutOfRange,
                        format!("Movie year must be between {MIN_YEAR} and {max_year}"),
                    )]
                })
        }
    }

    /// Require every field and produce a draft ready for insertion.
    ///
    /// `rate` defaults to 5 when absent. Unknown keys are ignored.
    pub fn validate_full(&self, payload: &Value) -> Result<MovieDraft, MovieValidationErrors> {
        let object = payload_object(payload)?;
        let mut issues = Vec::new();

        let title = required(object, Field::Title, &mut issues, title);
        let year = required(object, Field::Year, &mut issues, self.year_check());
        let director = required(object, Field::Director, &mut issues, director);
        let duration = required(object, Field::Duration, &mut issues, duration);
        let rate = match object.get(Field::Rate.name()) {
            Some(value) => record(&mut issues, rate(value)),
            None => Some(DEFAULT_RATE),
        };
        let poster = required(object, Field::Poster, &mut issues, poster);
        let genre = required(object, Field::Genre, &mut issues, genre);

        let (
            Some(title),
            Some(year),
            Some(director),
            Some(duration),
            Some(rate),
            Some(poster),
            Some(genre),
        ) = (title, year, director, duration, rate, poster, genre)
        else {
            return Err(MovieValidationErrors(issues));
        };

        Ok(MovieDraft {
            title,
            year,
            director,
            duration,
            rate,
            poster,
            genre,
        })
    }

    /// Check only the fields that are present. An empty object is valid.
    pub fn validate_partial(&self, payload: &Value) -> Result<MoviePatch, MovieValidationErrors> {
        let object = payload_object(payload)?;
        let mut issues = Vec::new();

        let patch = MoviePatch {
            title: optional(object, Field::Title, &mut issues, title),
            year: optional(object, Field::Year, &mut issues, self.year_check()),
            director: optional(object, Field::Director, &mut issues, director),
            duration: optional(object, Field::Duration, &mut issues, duration),
            rate: optional(object, Field::Rate, &mut issues, rate),
            poster: optional(object, Field::Poster, &mut issues, poster),
            genre: optional(object, Field::Genre, &mut issues, genre),
        };

        if issues.is_empty() {
            Ok(patch)
        } else {
            Err(MovieValidationErrors(issues))
        }
    }
}
