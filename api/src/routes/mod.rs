//! Route handlers
//!
//! - `auth` - registration, login and profile
//! - `cars` - catalog listing and owner management
//! - `rentals` - bookings, payment proofs and cancellation
//! - `health` - liveness and fallback handlers

pub mod auth;
pub mod cars;
pub mod health;
pub mod rentals;
