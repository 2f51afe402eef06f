//! Rental entity and its status lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DateRange;
use crate::errors::DomainError;

/// Payment method that, together with a proof file, settles a rental at creation
pub const ONLINE_PAYMENT: &str = "online";

/// Rental status
///
/// `pending -> paid`, `pending -> cancelled` and `paid -> cancelled` are the
/// only transitions. Nothing leaves `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Paid,
    Cancelled,
}

impl RentalStatus {
    /// Status assigned when a rental is first created
    pub fn initial(payment_method: Option<&str>, has_proof: bool) -> Self {
        match payment_method {
            Some(method) if method == ONLINE_PAYMENT && has_proof => RentalStatus::Paid,
            _ => RentalStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Paid => "paid",
            RentalStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, RentalStatus::Cancelled)
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RentalStatus::Pending),
            "paid" => Ok(RentalStatus::Paid),
            "cancelled" => Ok(RentalStatus::Cancelled),
            other => Err(DomainError::internal(format!(
                "Unknown rental status '{}'",
                other
            ))),
        }
    }
}

/// Trims the submitted method; blank input counts as absent
pub fn normalize_payment_method(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|method| !method.is_empty())
        .map(str::to_string)
}

/// Booking of one car by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    #[serde(rename = "rental_id")]
    pub id: i64,
    pub user_id: i64,
    pub car_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: f64,
    pub status: RentalStatus,
    pub payment_method: Option<String>,
    pub proof_of_payment_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rental {
    pub fn period(&self) -> DateRange {
        DateRange::from_ordered(self.start_date, self.end_date)
    }

    /// Whether this rental still holds its dates
    pub fn blocks(&self, car_id: i64, period: &DateRange) -> bool {
        self.car_id == car_id && self.status.is_active() && self.period().overlaps(period)
    }
}

/// Reservation request handed to the repository
#[derive(Debug, Clone, PartialEq)]
pub struct NewRental {
    pub user_id: i64,
    pub car_id: i64,
    pub period: DateRange,
    pub total_cost: f64,
    pub status: RentalStatus,
    pub payment_method: Option<String>,
    pub proof_of_payment_url: Option<String>,
}

/// Rental joined with the booked car's descriptive fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalWithCar {
    #[serde(flatten)]
    pub rental: Rental,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub car_type: String,
    pub daily_rate: f64,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn rental(status: RentalStatus) -> Rental {
        Rental {
            id: 1,
            user_id: 2,
            car_id: 5,
            start_date: date("2024-06-01"),
            end_date: date("2024-06-05"),
            total_cost: 200.0,
            status,
            payment_method: Some("online".to_string()),
            proof_of_payment_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_initial_status_derivation() {
        let online = normalize_payment_method(Some("  online "));
        assert_eq!(
            RentalStatus::initial(online.as_deref(), true),
            RentalStatus::Paid
        );
        assert_eq!(
            RentalStatus::initial(Some("online"), false),
            RentalStatus::Pending
        );
        assert_eq!(
            RentalStatus::initial(Some("cash"), true),
            RentalStatus::Pending
        );
        assert_eq!(RentalStatus::initial(None, true), RentalStatus::Pending);
    }

    #[test]
    fn test_normalize_payment_method() {
        assert_eq!(normalize_payment_method(Some(" card ")), Some("card".to_string()));
        assert_eq!(normalize_payment_method(Some("   ")), None);
        assert_eq!(normalize_payment_method(None), None);
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            RentalStatus::Pending,
            RentalStatus::Paid,
            RentalStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<RentalStatus>().unwrap(), status);
        }
        assert!("completed".parse::<RentalStatus>().is_err());
    }

    #[test]
    fn test_cancelled_rental_does_not_block() {
        let period = DateRange::new(date("2024-06-03"), date("2024-06-07")).unwrap();
        assert!(rental(RentalStatus::Paid).blocks(5, &period));
        assert!(!rental(RentalStatus::Cancelled).blocks(5, &period));
        assert!(!rental(RentalStatus::Pending).blocks(6, &period));
    }

    #[test]
    fn test_rental_with_car_flattens() {
        let joined = RentalWithCar {
            rental: rental(RentalStatus::Pending),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            car_type: "Sedan".to_string(),
            daily_rate: 40.0,
            image_url: None,
        };

        let json = serde_json::to_value(&joined).unwrap();
        assert_eq!(json["rental_id"], 1);
        assert_eq!(json["start_date"], "2024-06-01");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["make"], "Toyota");
        assert_eq!(json["type"], "Sedan");
    }
}
