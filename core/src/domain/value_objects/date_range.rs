//! Inclusive calendar date range used for bookings.

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::DomainError;

/// Booking period; both ends are rental days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::validation(
                "Start date must not be after end date",
            ));
        }
        Ok(Self { start, end })
    }

    /// For ranges read back from storage, where ordering already holds
    pub(crate) fn from_ordered(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `self.start <= other.end AND self.end >= other.start`
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}
