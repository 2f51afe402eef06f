//! Type definitions shared between crates
//!
//! - `response` - Error, message and health-check bodies

pub mod response;

pub use response::{ErrorResponse, HealthResponse, MessageResponse};
