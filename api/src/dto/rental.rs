use chrono::NaiveDate;
use rr_core::domain::entities::RentalStatus;
use rr_core::errors::DomainError;
use rr_core::services::rental::RentalRequest;
use serde::{Deserialize, Serialize};

use crate::multipart::MultipartForm;

/// Booking body, sent either as JSON or as multipart text fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    pub car_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl CreateRentalRequest {
    pub fn from_form(form: &MultipartForm) -> Result<Self, DomainError> {
        Ok(Self {
            car_id: form.parse("carId")?,
            start_date: form.parse("startDate")?,
            end_date: form.parse("endDate")?,
            total_cost: form.parse("totalCost")?,
            payment_method: form.text("paymentMethod").map(str::to_string),
        })
    }
}

impl From<CreateRentalRequest> for RentalRequest {
    fn from(request: CreateRentalRequest) -> Self {
        Self {
            car_id: request.car_id,
            start_date: request.start_date,
            end_date: request.end_date,
            total_cost: request.total_cost,
            payment_method: request.payment_method,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalCreatedResponse {
    pub message: String,
    pub rental_id: i64,
    pub status: RentalStatus,
}
