//! HTTP API layer

pub mod responses;
pub mod routes;

pub use routes::{AppState, routes};
