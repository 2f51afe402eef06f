//! Business services containing domain logic and use cases.

pub mod auth;
pub mod catalog;
pub mod media;
pub mod rental;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, ProfileChanges, RegisterUser};
pub use catalog::CatalogService;
pub use media::{MediaIntake, MediaPurpose, MediaStore, StoredMedia, Upload};
pub use rental::{RentalRequest, RentalService};
pub use token::{IssuedToken, TokenService, TokenServiceConfig};

#[cfg(any(test, feature = "mock-services"))]
pub use media::MockMediaStore;
