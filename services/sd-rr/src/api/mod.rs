//! HTTP API layer

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{AppState, router};
