//! Shared utilities and common types for the Rent-A-Ride server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response envelopes shared by the API layer

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, MediaConfig,
    PasswordConfig, ServerConfig,
};
pub use types::response::{ErrorResponse, HealthResponse, MessageResponse};
