//! Backend entry-point: loads settings and seed data, then serves the movie
//! catalogue over HTTP.

mod server;

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::MovieValidator;
use backend::inbound::http::health::HealthState;
use backend::seed_data::{SeedDataSettings, load_seed_movies};
use server::{ServerConfig, ServerSettings, create_server, drain_on};

fn config_error(source: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("failed to load configuration: {source}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os()).map_err(config_error)?;
    // Seed settings come from the environment and config files only.
    let seed_settings =
        SeedDataSettings::load_from_iter([OsString::from("movies-backend")]).map_err(config_error)?;

    let validator = MovieValidator::new(Arc::new(DefaultClock));
    let movies = load_seed_movies(&seed_settings, &validator)
        .map_err(|err| std::io::Error::other(format!("failed to load seed data: {err}")))?;

    let config = ServerConfig::new(settings.bind_addr()?, validator)
        .with_page_size(settings.page_size()?)
        .with_movies(movies);
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "movies backend listening");
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    server.await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
