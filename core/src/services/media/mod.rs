//! Media intake module
//!
//! Validates uploaded files and hands them to a `MediaStore`, which returns
//! the public reference persisted on cars, rentals and users.

mod intake;
mod store;

#[cfg(any(test, feature = "mock-services"))]
mod mock;

#[cfg(test)]
mod tests;

pub use intake::MediaIntake;
pub use store::{MediaPurpose, MediaStore, StoredMedia, Upload};

#[cfg(any(test, feature = "mock-services"))]
pub use mock::MockMediaStore;
