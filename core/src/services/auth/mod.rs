//! Authentication service module
//!
//! Registration, login and profile management for email/password accounts.

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::{AuthService, ProfileChanges, RegisterUser};
