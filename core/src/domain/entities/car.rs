//! Car entity representing a listing that can be rented.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Earliest model year accepted for a listing
pub const MIN_MODEL_YEAR: i32 = 1886;

/// Car listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(rename = "car_id")]
    pub id: i64,

    pub make: String,

    pub model: String,

    pub year: i32,

    /// Body type, e.g. "SUV" or "Sedan"
    #[serde(rename = "type")]
    pub car_type: String,

    /// Price per rental day
    pub daily_rate: f64,

    pub image_url: Option<String>,

    pub is_available: bool,

    /// Listing owner; seeded cars may have none
    pub owner_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Car {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == Some(user_id)
    }
}

/// Descriptive fields submitted when listing a car
#[derive(Debug, Clone, PartialEq)]
pub struct CarDetails {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub car_type: String,
    pub daily_rate: f64,
    pub description: Option<String>,
}

impl CarDetails {
    /// Trims text fields and checks value ranges
    pub fn validated(self) -> Result<Self, DomainError> {
        let make = self.make.trim().to_string();
        let model = self.model.trim().to_string();
        let car_type = self.car_type.trim().to_string();

        if make.is_empty() || model.is_empty() || car_type.is_empty() {
            return Err(DomainError::validation("Make, model and type are required"));
        }

        let latest_year = Utc::now().year() + 1;
        if self.year < MIN_MODEL_YEAR || self.year > latest_year {
            return Err(DomainError::validation(format!(
                "Year must be between {} and {}",
                MIN_MODEL_YEAR, latest_year
            )));
        }

        if !self.daily_rate.is_finite() || self.daily_rate <= 0.0 {
            return Err(DomainError::validation("Daily rate must be a positive number"));
        }

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            make,
            model,
            year: self.year,
            car_type,
            daily_rate: self.daily_rate,
            description,
        })
    }
}

/// Data needed to persist a new listing
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub owner_id: i64,
    pub details: CarDetails,
    pub image_url: String,
}
