//! Car repository trait for catalog persistence.

use async_trait::async_trait;

use crate::domain::entities::car::{Car, NewCar};
use crate::errors::DomainError;

#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Cars flagged available, newest first
    async fn list_available(&self) -> Result<Vec<Car>, DomainError>;

    async fn find_car(&self, id: i64) -> Result<Option<Car>, DomainError>;

    /// Cars listed by `owner_id`, newest first
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Car>, DomainError>;

    /// Persist a new listing; it starts out available
    async fn insert_car(&self, car: NewCar) -> Result<Car, DomainError>;

    /// Delete a car only if it belongs to `owner_id`
    ///
    /// # Returns
    /// * `Ok(true)` - Car was deleted
    /// * `Ok(false)` - No car with this id owned by `owner_id`
    /// * `Err(DomainError::Conflict)` - Rentals still reference the car
    async fn delete_owned(&self, car_id: i64, owner_id: i64) -> Result<bool, DomainError>;
}
