//! Token claims for JWT-based authentication.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Access token lifetime (1 hour)
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 3600;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id
    pub id: i64,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims valid for `ttl_seconds` from now
    pub fn new(user_id: i64, ttl_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: user_id,
            iat: now,
            exp: now + ttl_seconds,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Seconds left before expiry, zero once expired
    pub fn remaining_seconds(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}
