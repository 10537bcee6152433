//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the movie catalogue endpoints and the health endpoints
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`GenreSchema`]) that provide OpenAPI definitions without coupling domain
//!   types to the utoipa framework
//!
//! The generated specification is served by Swagger UI in debug builds.

use crate::inbound::http::movies::{DeleteMovieResponseBody, MovieResponseBody};
use crate::inbound::http::schemas::{
    CreateMovieRequestBody, ErrorCodeSchema, ErrorSchema, GenreSchema, UpdateMovieRequestBody,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movies backend API",
        description = "HTTP interface for browsing and editing the movie catalogue."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::movies::list_movies,
        crate::inbound::http::movies::page_movies,
        crate::inbound::http::movies::get_movie,
        crate::inbound::http::movies::create_movie,
        crate::inbound::http::movies::update_movie,
        crate::inbound::http::movies::delete_movie,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        MovieResponseBody,
        DeleteMovieResponseBody,
        CreateMovieRequestBody,
        UpdateMovieRequestBody,
        GenreSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "movies", description = "Movie catalogue operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema and path registration.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const GENRE_SCHEMA_NAME: &str = "crate.domain.Genre";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn openapi_error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        for field in ["code", "message", "traceId", "error", "details"] {
            assert_object_schema_has_field(error_schema, field);
        }
    }

    #[rstest]
    fn openapi_movie_schema_has_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let movie_schema = schemas.get("MovieResponseBody").expect("Movie schema");

        for field in [
            "id", "title", "year", "director", "duration", "poster", "genre", "rate",
        ] {
            assert_object_schema_has_field(movie_schema, field);
        }
        assert!(schemas.contains_key(GENRE_SCHEMA_NAME));
    }

    #[rstest]
    #[case("/movies")]
    #[case("/movies/{id}")]
    #[case("/movies/page/{pag}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn openapi_registers_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn movie_item_path_has_get_patch_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/movies/{id}").expect("item path");
        assert!(item.get.is_some());
        assert!(item.patch.is_some());
        assert!(item.delete.is_some());
    }
}
