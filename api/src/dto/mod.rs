pub mod auth;
pub mod car;
pub mod rental;

pub use auth::*;
pub use car::*;
pub use rental::*;
