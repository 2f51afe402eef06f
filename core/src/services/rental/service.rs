//! Rental lifecycle service implementation

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::entities::rental::{
    normalize_payment_method, NewRental, Rental, RentalStatus, RentalWithCar,
};
use crate::domain::value_objects::DateRange;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::RentalRepository;
use crate::services::media::{MediaIntake, MediaPurpose, MediaStore, Upload};

/// Booking request as submitted by the client
#[derive(Debug, Clone, PartialEq)]
pub struct RentalRequest {
    pub car_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: f64,
    pub payment_method: Option<String>,
}

/// Service managing the rental lifecycle
pub struct RentalService<R, M>
where
    R: RentalRepository,
    M: MediaStore,
{
    rental_repository: Arc<R>,
    media: Arc<MediaIntake<M>>,
}

impl<R, M> RentalService<R, M>
where
    R: RentalRepository,
    M: MediaStore,
{
    pub fn new(rental_repository: Arc<R>, media: Arc<MediaIntake<M>>) -> Self {
        Self {
            rental_repository,
            media,
        }
    }

    /// Book a car for `user_id`
    ///
    /// The status starts as `paid` only for an online payment that comes
    /// with a proof file; everything else starts `pending`.
    ///
    /// # Returns
    ///
    /// * `Ok(Rental)` - The inserted rental
    /// * `Err(DomainError::Validation)` - Reversed dates or negative cost
    /// * `Err(DomainError::Conflict)` - Dates overlap an active rental of the car
    /// * `Err(DomainError::NotFound)` - The car does not exist
    pub async fn create_rental(
        &self,
        user_id: i64,
        request: RentalRequest,
        proof: Option<Upload>,
    ) -> DomainResult<Rental> {
        let payment_method = normalize_payment_method(request.payment_method.as_deref());
        let period = DateRange::new(request.start_date, request.end_date)?;

        if !request.total_cost.is_finite() || request.total_cost < 0.0 {
            return Err(DomainError::validation(
                "Total cost must be a non-negative number",
            ));
        }

        let proof = self
            .media
            .accept_optional(MediaPurpose::PaymentReceipt, proof)
            .await?;
        let status = RentalStatus::initial(payment_method.as_deref(), proof.is_some());

        let new_rental = NewRental {
            user_id,
            car_id: request.car_id,
            period,
            total_cost: request.total_cost,
            status,
            payment_method,
            proof_of_payment_url: proof.as_ref().map(|p| p.reference.clone()),
        };

        match self.rental_repository.create_if_available(new_rental).await {
            Ok(rental) => {
                tracing::info!(
                    rental_id = rental.id,
                    car_id = rental.car_id,
                    user_id,
                    status = %rental.status,
                    "Rental created"
                );
                Ok(rental)
            }
            Err(e) => {
                if let DomainError::Conflict { .. } = &e {
                    tracing::warn!(
                        car_id = request.car_id,
                        start = %period.start(),
                        end = %period.end(),
                        "Rental rejected, dates unavailable"
                    );
                }
                if let Some(stored) = &proof {
                    self.media.discard(stored).await;
                }
                Err(e)
            }
        }
    }

    /// Rentals of `user_id`, visible only to that user
    pub async fn get_user_rentals(
        &self,
        caller_id: i64,
        user_id: i64,
    ) -> DomainResult<Vec<RentalWithCar>> {
        if caller_id != user_id {
            tracing::warn!(caller_id, user_id, "Rejected access to another user's rentals");
            return Err(DomainError::forbidden("Not authorized to view these rentals"));
        }

        self.rental_repository.list_for_user(user_id).await
    }

    pub async fn get_rental_by_id(
        &self,
        rental_id: i64,
        user_id: i64,
    ) -> DomainResult<RentalWithCar> {
        self.rental_repository
            .find_for_user(rental_id, user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental"))
    }

    /// Attach proof of payment after creation, marking the rental paid
    pub async fn upload_payment(
        &self,
        rental_id: i64,
        user_id: i64,
        proof: Option<Upload>,
    ) -> DomainResult<()> {
        let stored = self
            .media
            .accept(MediaPurpose::PaymentReceipt, proof)
            .await?;

        match self
            .rental_repository
            .record_payment(rental_id, user_id, &stored.reference)
            .await
        {
            Ok(true) => {
                tracing::info!(rental_id, user_id, "Payment proof recorded");
                Ok(())
            }
            Ok(false) => {
                self.media.discard(&stored).await;
                Err(DomainError::not_found("Rental"))
            }
            Err(e) => {
                self.media.discard(&stored).await;
                Err(e)
            }
        }
    }

    /// Soft-cancel a rental; the row is kept with status `cancelled`
    pub async fn cancel_rental(&self, rental_id: i64, user_id: i64) -> DomainResult<()> {
        if !self.rental_repository.cancel(rental_id, user_id).await? {
            return Err(DomainError::not_found("Rental"));
        }

        tracing::info!(rental_id, user_id, "Rental cancelled");
        Ok(())
    }
}
