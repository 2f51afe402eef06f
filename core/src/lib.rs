//! # Rent-A-Ride Core
//!
//! Core business logic and domain layer for the Rent-A-Ride backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Car, CarDetails, Claims, NewCar, NewRental, NewUser, ProfileUpdate, Rental, RentalStatus,
    RentalWithCar, User,
};
pub use domain::value_objects::{AuthSession, DateRange};
pub use errors::{AuthError, DomainError, DomainResult, ErrorKind, MediaError, TokenError};
pub use repositories::{CarRepository, RentalRepository, UserRepository};
pub use services::{
    AuthService, AuthServiceConfig, CatalogService, IssuedToken, MediaIntake, MediaPurpose,
    MediaStore, ProfileChanges, RegisterUser, RentalRequest, RentalService, StoredMedia,
    TokenService, TokenServiceConfig, Upload,
};

#[cfg(any(test, feature = "mock-services"))]
pub use repositories::MockDatabase;
#[cfg(any(test, feature = "mock-services"))]
pub use services::MockMediaStore;
