//! Repository interfaces for data persistence.

pub mod car;
pub mod rental;
pub mod user;

#[cfg(any(test, feature = "mock-services"))]
pub mod mock;

pub use car::CarRepository;
pub use rental::RentalRepository;
pub use user::UserRepository;

#[cfg(any(test, feature = "mock-services"))]
pub use mock::MockDatabase;
