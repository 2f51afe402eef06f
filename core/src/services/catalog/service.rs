//! Catalog service implementation

use std::sync::Arc;

use crate::domain::entities::car::{Car, CarDetails, NewCar};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::CarRepository;
use crate::services::media::{MediaIntake, MediaPurpose, MediaStore, Upload};

/// Service for browsing and managing car listings
pub struct CatalogService<C, M>
where
    C: CarRepository,
    M: MediaStore,
{
    car_repository: Arc<C>,
    media: Arc<MediaIntake<M>>,
}

impl<C, M> CatalogService<C, M>
where
    C: CarRepository,
    M: MediaStore,
{
    pub fn new(car_repository: Arc<C>, media: Arc<MediaIntake<M>>) -> Self {
        Self {
            car_repository,
            media,
        }
    }

    /// All cars currently open for booking
    pub async fn list_available(&self) -> DomainResult<Vec<Car>> {
        self.car_repository.list_available().await
    }

    pub async fn get_detail(&self, car_id: i64) -> DomainResult<Car> {
        self.car_repository
            .find_car(car_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Car"))
    }

    /// List a new car owned by `owner_id`; an image is mandatory
    pub async fn add_listing(
        &self,
        owner_id: i64,
        details: CarDetails,
        image: Option<Upload>,
    ) -> DomainResult<Car> {
        let details = details.validated()?;
        let image = self.media.accept(MediaPurpose::CarImage, image).await?;

        let new_car = NewCar {
            owner_id,
            details,
            image_url: image.reference.clone(),
        };

        match self.car_repository.insert_car(new_car).await {
            Ok(car) => {
                tracing::info!(car_id = car.id, owner_id, "Car listed");
                Ok(car)
            }
            Err(e) => {
                self.media.discard(&image).await;
                Err(e)
            }
        }
    }

    pub async fn list_mine(&self, owner_id: i64) -> DomainResult<Vec<Car>> {
        self.car_repository.list_by_owner(owner_id).await
    }

    /// Delete a listing owned by the caller
    ///
    /// A car that is missing and one owned by someone else both yield
    /// `NotFound`; a car still referenced by rentals yields `Conflict`.
    pub async fn delete_listing(&self, car_id: i64, owner_id: i64) -> DomainResult<()> {
        if !self.car_repository.delete_owned(car_id, owner_id).await? {
            return Err(DomainError::not_found("Car"));
        }

        tracing::info!(car_id, owner_id, "Car listing deleted");
        Ok(())
    }
}
