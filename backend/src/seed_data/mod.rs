//! Startup wiring for the movie seed dataset.

mod config;
mod startup;

pub use config::SeedDataSettings;
pub use startup::{BUILTIN_MOVIES, SeedDataError, load_seed_movies, parse_seed_movies};
