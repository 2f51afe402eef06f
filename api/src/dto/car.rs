use rr_core::domain::entities::CarDetails;
use rr_core::errors::DomainError;
use serde::{Deserialize, Serialize};

use crate::multipart::MultipartForm;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarCreatedResponse {
    pub message: String,
    pub car_id: i64,
}

/// Listing fields of a multipart car submission; range checks happen in the catalog service
pub fn car_details(form: &MultipartForm) -> Result<CarDetails, DomainError> {
    Ok(CarDetails {
        make: form.required_text("make")?.to_string(),
        model: form.required_text("model")?.to_string(),
        year: form.parse("year")?,
        car_type: form.required_text("type")?.to_string(),
        daily_rate: form.parse("dailyRate")?,
        description: form.text("description").map(str::to_string),
    })
}
