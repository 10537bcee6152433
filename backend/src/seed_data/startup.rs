//! Loading and checking the seed dataset.
//!
//! Every seed record passes through the same validator as client payloads,
//! so a bad dataset stops the process before it serves anything.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::domain::{
    DuplicateMovieIdError, Movie, MovieCollection, MovieId, MovieValidationErrors,
    MovieValidator,
};
use crate::seed_data::config::SeedDataSettings;

/// Dataset compiled into the binary and used when no path is configured.
pub const BUILTIN_MOVIES: &str = include_str!("../../fixtures/movies.json");

/// Errors returned while loading the seed dataset.
#[derive(Debug, Error)]
pub enum SeedDataError {
    /// Dataset file could not be read.
    #[error("failed to read seed data at {path}: {source}")]
    Read {
        /// Path to the dataset file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Dataset is not a JSON array.
    #[error("seed data is not a JSON array of movies: {0}")]
    Parse(#[from] serde_json::Error),
    /// A record has no usable identifier.
    #[error("seed record {index} has a missing or blank id")]
    InvalidId {
        /// Position of the record in the dataset.
        index: usize,
    },
    /// A record fails movie validation.
    #[error("seed record {index} is invalid: {errors}")]
    InvalidRecord {
        /// Position of the record in the dataset.
        index: usize,
        /// Every failing field.
        errors: MovieValidationErrors,
    },
    /// Two records share an identifier.
    #[error("seed data is inconsistent: {0}")]
    Duplicate(#[from] DuplicateMovieIdError),
}

/// Build the initial collection from the configured dataset.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use backend::domain::MovieValidator;
/// use backend::seed_data::{SeedDataSettings, load_seed_movies};
/// use mockable::DefaultClock;
///
/// let validator = MovieValidator::new(Arc::new(DefaultClock));
/// let movies = load_seed_movies(&SeedDataSettings { path: None }, &validator)
///     .expect("built-in dataset is valid");
/// assert!(!movies.is_empty());
/// ```
pub fn load_seed_movies(
    settings: &SeedDataSettings,
    validator: &MovieValidator,
) -> Result<MovieCollection, SeedDataError> {
    let movies = match settings.path() {
        Some(path) => {
            let contents = read_seed_file(path)?;
            let movies = parse_seed_movies(&contents, validator)?;
            info!(path = %path.display(), count = movies.len(), "seed data loaded");
            movies
        }
        None => {
            let movies = parse_seed_movies(BUILTIN_MOVIES, validator)?;
            info!(source = "built-in", count = movies.len(), "seed data loaded");
            movies
        }
    };
    Ok(movies)
}

/// Parse and validate a JSON array of movie records.
///
/// Records keep their own `id`; every other field is checked as on create.
pub fn parse_seed_movies(
    contents: &str,
    validator: &MovieValidator,
) -> Result<MovieCollection, SeedDataError> {
    let records: Vec<Value> = serde_json::from_str(contents)?;
    let movies = records
        .iter()
        .enumerate()
        .map(|(index, record)| seed_movie(index, record, validator))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MovieCollection::try_from_movies(movies)?)
}

fn seed_movie(
    index: usize,
    record: &Value,
    validator: &MovieValidator,
) -> Result<Movie, SeedDataError> {
    let draft = validator
        .validate_full(record)
        .map_err(|errors| SeedDataError::InvalidRecord { index, errors })?;
    let id = record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|raw| MovieId::new(raw).ok())
        .ok_or(SeedDataError::InvalidId { index })?;
    Ok(Movie::new(id, draft))
}

fn read_seed_file(path: &Path) -> Result<String, SeedDataError> {
    let read_error = |source: std::io::Error| SeedDataError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed data path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(Path::new(file_name)).map_err(read_error)
}

#[cfg(test)]
mod tests {
    //! Unit tests for seed dataset loading.

    use std::io::Write;
    use std::sync::Arc;

    use mockable::DefaultClock;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    #[fixture]
    fn validator() -> MovieValidator {
        MovieValidator::new(Arc::new(DefaultClock))
    }

    fn record(id: &str) -> Value {
        json!({
            "id": id,
            "title": "Alien",
            "year": 1979,
            "director": "Ridley Scott",
            "duration": 117,
            "poster": "https://example.com/alien.jpg",
            "genre": ["Horror", "Science Fiction"],
            "rate": 8.5
        })
    }

    fn seed_file(records: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        write!(file, "{records}").expect("write seed file");
        file
    }

    #[rstest]
    fn built_in_dataset_is_valid(validator: MovieValidator) {
        let movies = load_seed_movies(&SeedDataSettings { path: None }, &validator)
            .expect("built-in dataset loads");
        assert_eq!(movies.len(), 10);
        let first = movies.list(None).into_iter().next().expect("non-empty dataset");
        assert_eq!(first.title(), "The Shawshank Redemption");
    }

    #[rstest]
    fn configured_path_replaces_built_in_dataset(validator: MovieValidator) {
        let file = seed_file(&json!([record("a"), record("b")]));
        let settings = SeedDataSettings {
            path: Some(file.path().to_path_buf()),
        };

        let movies = load_seed_movies(&settings, &validator).expect("seed file loads");

        assert_eq!(movies.len(), 2);
        assert!(movies.get(&MovieId::new("b").expect("non-empty id")).is_some());
    }

    #[rstest]
    fn missing_file_is_a_read_error(validator: MovieValidator) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let settings = SeedDataSettings {
            path: Some(dir.path().join("absent.json")),
        };

        let err = load_seed_movies(&settings, &validator).expect_err("file is missing");

        assert!(matches!(err, SeedDataError::Read { .. }));
    }

    #[rstest]
    fn duplicate_ids_abort_loading(validator: MovieValidator) {
        let contents = json!([record("a"), record("a")]).to_string();
        let err = parse_seed_movies(&contents, &validator).expect_err("duplicate ids");
        assert!(matches!(err, SeedDataError::Duplicate(_)));
    }

    #[rstest]
    #[case(json!([{ "title": "No id" }]))]
    #[case(json!([record("a"), { "id": "b", "year": 1800 }]))]
    fn invalid_records_abort_loading(validator: MovieValidator, #[case] records: Value) {
        let err = parse_seed_movies(&records.to_string(), &validator).expect_err("bad record");
        assert!(matches!(err, SeedDataError::InvalidRecord { .. }));
    }

    #[rstest]
    #[case(json!(""))]
    #[case(json!("   "))]
    #[case(json!(7))]
    fn records_need_a_textual_id(validator: MovieValidator, #[case] id: Value) {
        let mut bad = record("unused");
        bad["id"] = id;
        let err = parse_seed_movies(&json!([bad]).to_string(), &validator).expect_err("bad id");
        assert!(matches!(err, SeedDataError::InvalidId { index: 0 }));
    }

    #[rstest]
    fn non_array_payloads_are_parse_errors(validator: MovieValidator) {
        let err = parse_seed_movies("{}", &validator).expect_err("not an array");
        assert!(matches!(err, SeedDataError::Parse(_)));
    }
}
