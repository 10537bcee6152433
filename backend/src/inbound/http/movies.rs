//! Movie catalogue HTTP handlers.
//!
//! ```text
//! GET    /movies?genre=comedy
//! GET    /movies/page/{pag}
//! GET    /movies/{id}
//! POST   /movies
//! PATCH  /movies/{id}
//! DELETE /movies/{id}
//! ```
//!
//! Handlers translate requests into driving-port calls and domain results
//! into JSON bodies. Write payloads are forwarded as raw JSON; the domain
//! validator owns every field rule.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::movies::serialize_rate;
use crate::domain::ports::{
    CreateMovieRequest, DeleteMovieRequest, GetMovieRequest, ListMoviesRequest,
    PageMoviesRequest, UpdateMovieRequest,
};
use crate::domain::{Genre, Movie};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    CreateMovieRequestBody, ErrorSchema, GenreSchema, UpdateMovieRequestBody,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_page_number};

/// Body returned after a successful delete.
pub const MOVIE_DELETED: &str = "Movie deleted";

/// Query string accepted by `GET /movies`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovieListQuery {
    /// Case-insensitive genre filter. Empty selects every movie.
    pub genre: Option<String>,
}

/// Movie representation returned by every movie endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MovieResponseBody {
    #[schema(example = "dcdd0fad-a94c-4810-8acc-5f108d3b18c3")]
    pub id: String,
    #[schema(example = "The Shawshank Redemption")]
    pub title: String,
    #[schema(example = 1994)]
    pub year: i32,
    #[schema(example = "Frank Darabont")]
    pub director: String,
    /// Runtime in minutes.
    #[schema(example = 142)]
    pub duration: u32,
    pub poster: String,
    #[schema(value_type = Vec<GenreSchema>)]
    pub genre: Vec<Genre>,
    /// Whole ratings are written as integers.
    #[schema(example = 9.3)]
    #[serde(serialize_with = "serialize_rate")]
    pub rate: f64,
}

impl From<Movie> for MovieResponseBody {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id().to_string(),
            title: movie.title().to_owned(),
            year: movie.year(),
            director: movie.director().to_owned(),
            duration: movie.duration(),
            poster: movie.poster().to_owned(),
            genre: movie.genre().to_vec(),
            rate: movie.rate(),
        }
    }
}

/// Confirmation returned by `DELETE /movies/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteMovieResponseBody {
    #[schema(example = "Movie deleted")]
    pub message: String,
}

fn to_bodies(movies: Vec<Movie>) -> Vec<MovieResponseBody> {
    movies.into_iter().map(MovieResponseBody::from).collect()
}

/// List every movie, optionally filtered by genre.
#[utoipa::path(
    get,
    path = "/movies",
    params(MovieListQuery),
    responses(
        (status = 200, description = "Movies in collection order", body = [MovieResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "listMovies"
)]
#[get("/movies")]
pub async fn list_movies(
    state: web::Data<HttpState>,
    query: web::Query<MovieListQuery>,
) -> ApiResult<web::Json<Vec<MovieResponseBody>>> {
    let MovieListQuery { genre } = query.into_inner();
    let response = state
        .movies_query
        .list_movies(ListMoviesRequest { genre })
        .await?;
    Ok(web::Json(to_bodies(response.movies)))
}

/// Return one fixed-size page of the collection.
#[utoipa::path(
    get,
    path = "/movies/page/{pag}",
    params(("pag" = i64, Path, description = "1-indexed page number")),
    responses(
        (status = 200, description = "Movies on the page; empty past the end", body = [MovieResponseBody]),
        (status = 400, description = "Page number is not an integer", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "pageMovies"
)]
#[get("/movies/page/{pag}")]
pub async fn page_movies(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<MovieResponseBody>>> {
    let page = parse_page_number(path.as_str(), FieldName::new("pag"))?;
    let response = state
        .movies_query
        .page_movies(PageMoviesRequest { page })
        .await?;
    Ok(web::Json(to_bodies(response.movies)))
}

/// Fetch a movie by identifier.
#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Movie identifier")),
    responses(
        (status = 200, description = "The movie", body = MovieResponseBody),
        (status = 404, description = "Movie not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "getMovie"
)]
#[get("/movies/{id}")]
pub async fn get_movie(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MovieResponseBody>> {
    let response = state
        .movies_query
        .get_movie(GetMovieRequest {
            id: path.into_inner(),
        })
        .await?;
    Ok(web::Json(MovieResponseBody::from(response.movie)))
}

/// Create a movie with a fresh identifier.
#[utoipa::path(
    post,
    path = "/movies",
    request_body = CreateMovieRequestBody,
    responses(
        (status = 201, description = "Movie created", body = MovieResponseBody),
        (status = 400, description = "Invalid movie payload", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "createMovie"
)]
#[post("/movies")]
pub async fn create_movie(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let response = state
        .movies
        .create_movie(CreateMovieRequest {
            payload: payload.into_inner(),
        })
        .await?;
    Ok(HttpResponse::Created().json(MovieResponseBody::from(response.movie)))
}

/// Merge the provided fields into an existing movie.
#[utoipa::path(
    patch,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Movie identifier")),
    request_body = UpdateMovieRequestBody,
    responses(
        (status = 200, description = "Updated movie", body = MovieResponseBody),
        (status = 400, description = "Invalid movie payload", body = ErrorSchema),
        (status = 404, description = "Movie not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "updateMovie"
)]
#[patch("/movies/{id}")]
pub async fn update_movie(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<MovieResponseBody>> {
    let response = state
        .movies
        .update_movie(UpdateMovieRequest {
            id: path.into_inner(),
            payload: payload.into_inner(),
        })
        .await?;
    Ok(web::Json(MovieResponseBody::from(response.movie)))
}

/// Remove a movie.
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Movie identifier")),
    responses(
        (status = 200, description = "Movie deleted", body = DeleteMovieResponseBody),
        (status = 404, description = "Movie not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "deleteMovie"
)]
#[delete("/movies/{id}")]
pub async fn delete_movie(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteMovieResponseBody>> {
    state
        .movies
        .delete_movie(DeleteMovieRequest {
            id: path.into_inner(),
        })
        .await?;
    Ok(web::Json(DeleteMovieResponseBody {
        message: MOVIE_DELETED.to_owned(),
    }))
}

#[cfg(test)]
#[path = "movies_tests.rs"]
mod tests;
