//! Rental repository trait.
//!
//! Every read and write except creation is scoped to `(rental_id, user_id)`,
//! so a rental owned by someone else is indistinguishable from a missing one.

use async_trait::async_trait;

use crate::domain::entities::rental::{NewRental, Rental, RentalWithCar};
use crate::errors::DomainError;

#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Reserve the car for the requested period and insert the rental
    ///
    /// The overlap check against non-cancelled rentals of the same car and
    /// the insert must happen atomically with respect to other reservations
    /// of that car.
    ///
    /// # Returns
    /// * `Ok(Rental)` - The inserted rental
    /// * `Err(DomainError::NotFound)` - The car does not exist
    /// * `Err(DomainError::Conflict)` - The period overlaps an active rental; nothing inserted
    async fn create_if_available(&self, rental: NewRental) -> Result<Rental, DomainError>;

    /// Rentals of `user_id` joined with car details, latest start date first
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<RentalWithCar>, DomainError>;

    async fn find_for_user(
        &self,
        rental_id: i64,
        user_id: i64,
    ) -> Result<Option<RentalWithCar>, DomainError>;

    /// Attach a proof of payment, marking the rental paid online
    ///
    /// Cancelled rentals are left untouched. Returns `false` when no row
    /// matched.
    async fn record_payment(
        &self,
        rental_id: i64,
        user_id: i64,
        proof_url: &str,
    ) -> Result<bool, DomainError>;

    /// Soft-cancel; the row is kept. Returns `false` when no row matched.
    async fn cancel(&self, rental_id: i64, user_id: i64) -> Result<bool, DomainError>;
}
