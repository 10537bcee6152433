//! Tests for the movie service.

use std::sync::Arc;

use mockable::DefaultClock;
use pagination::PageNumber;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockMovieRepository;

fn service(repo: MockMovieRepository) -> MovieService<MockMovieRepository> {
    MovieService::new(
        Arc::new(repo),
        MovieValidator::new(Arc::new(DefaultClock)),
        PageSize::DEFAULT,
    )
}

#[fixture]
fn payload() -> Value {
    json!({
        "title": "Pulp Fiction",
        "year": 1994,
        "director": "Quentin Tarantino",
        "duration": 154,
        "poster": "https://www.themoviedb.org/t/p/original/vQWk5YBFWF4bZaofAbv0tShwBvQ.jpg",
        "genre": ["Crime", "Drama"]
    })
}

fn stored_movie(payload: &Value) -> Movie {
    let draft = MovieValidator::new(Arc::new(DefaultClock))
        .validate_full(payload)
        .expect("fixture payload is valid");
    Movie::new(MovieId::new("stored").expect("non-empty id"), draft)
}

#[rstest]
#[tokio::test]
async fn create_assigns_fresh_ids_and_inserts(payload: Value) {
    let mut repo = MockMovieRepository::new();
    repo.expect_insert().times(2).returning(|_| Ok(()));
    let service = service(repo);

    let first = service
        .create_movie(CreateMovieRequest {
            payload: payload.clone(),
        })
        .await
        .expect("create succeeds");
    let second = service
        .create_movie(CreateMovieRequest { payload })
        .await
        .expect("create succeeds");

    assert_ne!(first.movie.id(), second.movie.id());
    assert_eq!(first.movie.rate(), 5.0);
    assert_eq!(first.movie.title(), "Pulp Fiction");
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_payload_without_touching_storage() {
    let mut repo = MockMovieRepository::new();
    repo.expect_insert().times(0);

    let error = service(repo)
        .create_movie(CreateMovieRequest {
            payload: json!({ "title": "" }),
        })
        .await
        .expect_err("invalid payload");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), MOVIE_VALIDATION_FAILED);
    assert!(error.details().is_none());
    let errors = error
        .field_errors()
        .and_then(Value::as_array)
        .expect("field errors list every issue");
    assert_eq!(errors.len(), 6);
    assert_eq!(errors[0]["field"], "title");
    assert_eq!(errors[0]["code"], "too_small");
}

#[rstest]
#[tokio::test]
async fn create_maps_repository_errors_to_internal(payload: Value) {
    let mut repo = MockMovieRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|movie| Err(MovieRepositoryError::duplicate_id(movie.id().to_string())));

    let error = service(repo)
        .create_movie(CreateMovieRequest { payload })
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert!(error.message().contains("already holds id"));
}

#[rstest]
#[tokio::test]
async fn get_returns_stored_movie(payload: Value) {
    let movie = stored_movie(&payload);
    let expected = movie.clone();
    let mut repo = MockMovieRepository::new();
    repo.expect_find_by_id()
        .withf(|id| id.as_ref() == "stored")
        .return_once(move |_| Ok(Some(movie)));

    let response = service(repo)
        .get_movie(GetMovieRequest {
            id: "stored".to_owned(),
        })
        .await
        .expect("movie found");

    assert_eq!(response.movie, expected);
}

#[rstest]
#[case("missing")]
#[case("")]
#[tokio::test]
async fn get_unknown_or_blank_id_is_not_found(#[case] id: &str) {
    let mut repo = MockMovieRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let error = service(repo)
        .get_movie(GetMovieRequest { id: id.to_owned() })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), MOVIE_NOT_FOUND);
}

#[rstest]
#[case(Some("".to_owned()), None)]
#[case(None, None)]
#[case(Some("comedy".to_owned()), Some("comedy".to_owned()))]
#[tokio::test]
async fn list_treats_blank_genre_as_no_filter(
    #[case] genre: Option<String>,
    #[case] forwarded: Option<String>,
) {
    let mut repo = MockMovieRepository::new();
    repo.expect_list()
        .withf(move |genre| *genre == forwarded)
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let response = service(repo)
        .list_movies(ListMoviesRequest { genre })
        .await
        .expect("list succeeds");

    assert!(response.movies.is_empty());
}

#[rstest]
#[tokio::test]
async fn page_uses_configured_size() {
    let mut repo = MockMovieRepository::new();
    repo.expect_page()
        .withf(|request| request.number().get() == 2 && request.size().get() == 4)
        .times(1)
        .returning(|_| Ok(Vec::new()));
    let service = MovieService::new(
        Arc::new(repo),
        MovieValidator::new(Arc::new(DefaultClock)),
        PageSize::new(4).expect("non-zero size"),
    );

    service
        .page_movies(PageMoviesRequest {
            page: PageNumber::new(2),
        })
        .await
        .expect("page succeeds");
}

#[rstest]
#[tokio::test]
async fn update_validates_before_lookup() {
    let mut repo = MockMovieRepository::new();
    repo.expect_update().times(0);

    let error = service(repo)
        .update_movie(UpdateMovieRequest {
            id: "missing".to_owned(),
            payload: json!({ "year": 1800 }),
        })
        .await
        .expect_err("invalid patch");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_returns_merged_movie(payload: Value) {
    let merged = stored_movie(&payload);
    let expected = merged.clone();
    let mut repo = MockMovieRepository::new();
    repo.expect_update()
        .withf(|id, patch| id.as_ref() == "stored" && patch.title.as_deref() == Some("Heat"))
        .return_once(move |_, _| Ok(Some(merged)));

    let response = service(repo)
        .update_movie(UpdateMovieRequest {
            id: "stored".to_owned(),
            payload: json!({ "title": "Heat" }),
        })
        .await
        .expect("update succeeds");

    assert_eq!(response.movie, expected);
}

#[rstest]
#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let mut repo = MockMovieRepository::new();
    repo.expect_update().return_once(|_, _| Ok(None));

    let error = service(repo)
        .update_movie(UpdateMovieRequest {
            id: "missing".to_owned(),
            payload: json!({}),
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_reports_missing_movies(
    #[case] existed: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let mut repo = MockMovieRepository::new();
    repo.expect_remove().return_once(move |_| Ok(existed));

    let result = service(repo)
        .delete_movie(DeleteMovieRequest {
            id: "stored".to_owned(),
        })
        .await;

    assert_eq!(result.err().map(|error| error.code()), expected);
}
