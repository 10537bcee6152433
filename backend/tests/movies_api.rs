//! End-to-end tests driving the movie catalogue through the public library API.

use std::sync::Arc;

use actix_http::Request;
use actix_web::{
    App,
    body::BoxBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test::{self, TestRequest},
    web,
};
use backend::Trace;
use backend::domain::{MovieService, MovieValidator, TRACE_ID_HEADER};
use backend::inbound::http::movies::{
    create_movie, delete_movie, get_movie, list_movies, page_movies, update_movie,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::validation::json_config;
use backend::outbound::memory::InMemoryMovieRepository;
use backend::seed_data::{BUILTIN_MOVIES, parse_seed_movies};
use mockable::DefaultClock;
use pagination::PageSize;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn state() -> HttpState {
    let validator = MovieValidator::new(Arc::new(DefaultClock));
    let movies = parse_seed_movies(BUILTIN_MOVIES, &validator).expect("built-in seed is valid");
    let repository = Arc::new(InMemoryMovieRepository::new(movies));
    let service = Arc::new(MovieService::new(repository, validator, PageSize::DEFAULT));
    HttpState::new(service.clone(), service)
}

async fn init_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .wrap(Trace)
            .service(list_movies)
            .service(page_movies)
            .service(get_movie)
            .service(create_movie)
            .service(update_movie)
            .service(delete_movie),
    )
    .await
}

async fn send(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    request: TestRequest,
) -> (StatusCode, Value) {
    let res = test::call_service(app, request.to_request()).await;
    let status = res.status();
    assert!(
        res.headers().contains_key(TRACE_ID_HEADER),
        "every response carries a trace id"
    );
    let body = test::read_body_json(res).await;
    (status, body)
}

fn movie_count(body: &Value) -> usize {
    body.as_array().map_or(0, Vec::len)
}

#[rstest]
#[actix_web::test]
async fn movie_lifecycle(state: HttpState) {
    let app = init_app(state).await;

    let (status, created) = send(
        &app,
        TestRequest::post().uri("/movies").set_json(json!({
            "title": "Paddington 2",
            "year": 2017,
            "director": "Paul King",
            "duration": 103,
            "poster": "https://img.example.com/paddington-2.jpg",
            "genre": ["Comedy", "Fantasy"],
            "rate": 7.8
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("id assigned").to_owned();
    let item = format!("/movies/{id}");

    let (_, comedies) = send(&app, TestRequest::get().uri("/movies?genre=COMEDY")).await;
    assert_eq!(comedies, json!([created.clone()]));

    let (_, everything) = send(&app, TestRequest::get().uri("/movies")).await;
    assert_eq!(movie_count(&everything), 11);
    assert_eq!(everything[10], created);

    let (status, unchanged) = send(&app, TestRequest::patch().uri(&item).set_json(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged, created);

    let (status, updated) = send(
        &app,
        TestRequest::patch()
            .uri(&item)
            .set_json(json!({ "rate": 8.1, "title": "Paddington Two" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["rate"], json!(8.1));
    assert_eq!(updated["title"], json!("Paddington Two"));
    assert_eq!(updated["year"], json!(2017));

    let (_, last_page) = send(&app, TestRequest::get().uri("/movies/page/4")).await;
    assert_eq!(movie_count(&last_page), 2);
    assert_eq!(last_page[1], updated);

    let (status, deleted) = send(&app, TestRequest::delete().uri(&item)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "message": "Movie deleted" }));

    let (status, missing) = send(&app, TestRequest::get().uri(&item)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["message"], json!("Movie not Found"));

    let (_, everything) = send(&app, TestRequest::get().uri("/movies")).await;
    assert_eq!(movie_count(&everything), 10);
}

#[rstest]
#[actix_web::test]
async fn rejected_create_leaves_the_catalogue_untouched(state: HttpState) {
    let app = init_app(state).await;

    let (status, error) = send(
        &app,
        TestRequest::post()
            .uri("/movies")
            .set_json(json!({ "title": "", "genre": ["Western"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], json!("Movie payload failed validation"));
    let issues = error["error"]
        .as_array()
        .expect("issues listed");
    assert!(issues.iter().any(|issue| issue["field"] == "genre"));
    assert!(issues.iter().any(|issue| issue["field"] == "title"));
    assert!(error["traceId"].is_string());

    let (_, everything) = send(&app, TestRequest::get().uri("/movies")).await;
    assert_eq!(movie_count(&everything), 10);
}

#[rstest]
#[actix_web::test]
async fn concurrent_creates_are_all_kept(state: HttpState) {
    let app = init_app(state).await;
    let payload = json!({
        "title": "Clone",
        "year": 2001,
        "director": "Someone",
        "duration": 90,
        "poster": "https://img.example.com/clone.jpg",
        "genre": ["Drama"]
    });

    let requests = (0..8).map(|_| {
        send(
            &app,
            TestRequest::post().uri("/movies").set_json(payload.clone()),
        )
    });
    let responses = futures::future::join_all(requests).await;

    let mut ids: Vec<String> = responses
        .iter()
        .filter_map(|(_, body)| body["id"].as_str().map(str::to_owned))
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);

    let (_, everything) = send(&app, TestRequest::get().uri("/movies")).await;
    assert_eq!(movie_count(&everything), 18);
}
