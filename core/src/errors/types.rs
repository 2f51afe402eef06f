//! Error types for credentials, tokens and uploaded media
//!
//! Messages here are the ones surfaced to API clients, so they never carry
//! secrets or row data.

use thiserror::Error;

use super::ErrorKind;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserAlreadyExists => ErrorKind::Conflict,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UserAlreadyExists => "user_already_exists",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::UserNotFound => "user_not_found",
        }
    }
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Not authorized, no token")]
    MissingToken,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::TokenGenerationFailed => ErrorKind::ServerError,
            _ => ErrorKind::Unauthorized,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MissingToken => "missing_token",
            TokenError::InvalidTokenFormat => "invalid_token_format",
            TokenError::TokenExpired => "token_expired",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::TokenGenerationFailed => "token_generation_failed",
        }
    }
}

/// Upload intake errors
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Missing required file: {field}")]
    MissingFile { field: String },

    #[error("Unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },

    #[error("Failed to store file: {message}")]
    StorageFailed { message: String },
}

impl MediaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MediaError::MissingFile { .. } | MediaError::UnsupportedContentType { .. } => {
                ErrorKind::BadRequest
            }
            MediaError::StorageFailed { .. } => ErrorKind::ServerError,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MediaError::MissingFile { .. } => "missing_file",
            MediaError::UnsupportedContentType { .. } => "unsupported_content_type",
            MediaError::StorageFailed { .. } => "storage_failed",
        }
    }
}
