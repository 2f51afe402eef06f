//! Result of a successful registration or login.

use crate::domain::entities::User;

/// Authenticated user together with a freshly issued access token
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: User,

    /// Signed JWT access token
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl AuthSession {
    pub fn new(user: User, token: String, expires_in: i64) -> Self {
        Self {
            user,
            token,
            expires_in,
        }
    }
}
