//! User entity representing a registered account in the Rent-A-Ride system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier
    #[serde(rename = "user_id")]
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    /// Lowercased, trimmed email address
    pub email: String,

    /// bcrypt hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Public path of the uploaded driver license, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_license_url: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

/// Data needed to persist a freshly registered user
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Creates a new user record, normalizing the email address
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: &str,
        password_hash: String,
    ) -> Self {
        Self {
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            email: normalize_email(email),
            password_hash,
        }
    }
}

/// Partial profile changes; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub driver_license_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.driver_license_url.is_none()
    }

    /// Applies the changes to an in-memory user
    pub fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(url) = &self.driver_license_url {
            user.driver_license_url = Some(url.clone());
        }
    }
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
