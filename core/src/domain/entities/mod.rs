//! Domain entities representing core business objects.

pub mod car;
pub mod rental;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use car::{Car, CarDetails, NewCar};
pub use rental::{
    normalize_payment_method, NewRental, Rental, RentalStatus, RentalWithCar, ONLINE_PAYMENT,
};
pub use token::{Claims, DEFAULT_TOKEN_EXPIRY_SECONDS};
pub use user::{normalize_email, NewUser, ProfileUpdate, User};
