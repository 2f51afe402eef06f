//! Rental lifecycle service module
//!
//! Booking with conflict detection, payment proof handling, ownership-scoped
//! reads and soft cancellation.

mod service;

#[cfg(test)]
mod tests;

pub use service::{RentalRequest, RentalService};
