//! HTTP layer of the Rent-A-Ride server
//!
//! Exposed as a library so the integration tests can build the app against
//! in-memory repositories.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod multipart;
pub mod routes;

pub use app::{create_app, AppState};
