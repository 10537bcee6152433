//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod movies;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
