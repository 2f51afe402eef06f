//! Value objects shared across services.

pub mod auth_session;
pub mod date_range;

pub use auth_session::AuthSession;
pub use date_range::DateRange;
