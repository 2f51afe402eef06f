use rr_core::domain::entities::User;
use rr_core::domain::value_objects::AuthSession;
use rr_core::services::auth::{ProfileChanges, RegisterUser};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::multipart::MultipartForm;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl RegisterRequest {
    /// Trim names and email, lowercase the email
    ///
    /// Runs before validation so padded input is judged by what gets stored.
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password,
        }
    }
}

impl From<RegisterRequest> for RegisterUser {
    fn from(request: RegisterRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Login credentials; blank values are left to fail as invalid credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User fields echoed back after register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserSummary,
    pub token: String,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, session: &AuthSession) -> Self {
        Self {
            message: message.into(),
            user: UserSummary::from(&session.user),
            token: session.token.clone(),
        }
    }
}

/// Name fields of a multipart profile update
pub fn profile_changes(form: &MultipartForm) -> ProfileChanges {
    ProfileChanges {
        first_name: form.text("firstName").map(str::to_string),
        last_name: form.text("lastName").map(str::to_string),
    }
}
