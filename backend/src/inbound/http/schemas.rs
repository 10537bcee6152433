//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested movie does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Validation failures list every failing field under `error`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Movie not Found")]
    message: String,
    /// Correlation identifier echoed from the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// One entry per failing field, each with `field`, `code`, `message`
    /// and an optional array `index`.
    error: Option<Vec<serde_json::Value>>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Genre`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Genre)]
pub enum GenreSchema {
    Action,
    Comedy,
    Drama,
    Horror,
    #[schema(rename = "Science Fiction")]
    ScienceFiction,
    Romance,
    Thriller,
    Fantasy,
    Documentary,
    Crime,
    #[schema(rename = "Sci-Fi")]
    SciFi,
}

/// Request body accepted by `POST /movies`.
///
/// The handler takes raw JSON so the domain validator can report each field;
/// this type only documents the accepted shape.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateMovieRequestBody {
    #[schema(example = "The Godfather")]
    title: String,
    #[schema(minimum = 1900, example = 1972)]
    year: i64,
    #[schema(example = "Francis Ford Coppola")]
    director: String,
    /// Runtime in minutes.
    #[schema(minimum = 1, example = 175)]
    duration: i64,
    /// Defaults to 5 when omitted.
    #[schema(maximum = 10, example = 9.2)]
    rate: Option<f64>,
    #[schema(example = "https://img.example.com/godfather.jpg")]
    poster: String,
    genre: Vec<GenreSchema>,
}

/// Request body accepted by `PATCH /movies/{id}`. Every field is optional.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdateMovieRequestBody {
    title: Option<String>,
    #[schema(minimum = 1900)]
    year: Option<i64>,
    director: Option<String>,
    #[schema(minimum = 1)]
    duration: Option<i64>,
    #[schema(maximum = 10)]
    rate: Option<f64>,
    poster: Option<String>,
    genre: Option<Vec<GenreSchema>>,
}
