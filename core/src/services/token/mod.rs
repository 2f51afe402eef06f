//! Token service module for JWT management
//!
//! Issues and verifies the HS256 access tokens that carry the user id.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::{IssuedToken, TokenService};
