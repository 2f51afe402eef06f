//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, MediaError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Media(#[from] MediaError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse classification every domain error collapses onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    ServerError,
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        DomainError::Forbidden {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }

    /// Overlap with an active rental of the same car
    pub fn dates_unavailable() -> Self {
        DomainError::conflict("Car is not available for the selected dates")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::BadRequest,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Forbidden { .. } => ErrorKind::Forbidden,
            DomainError::Conflict { .. } => ErrorKind::Conflict,
            DomainError::Internal { .. } => ErrorKind::ServerError,
            DomainError::Auth(e) => e.kind(),
            DomainError::Token(e) => e.kind(),
            DomainError::Media(e) => e.kind(),
        }
    }

    /// Stable machine-readable code for API bodies
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "validation_error",
            DomainError::NotFound { .. } => "not_found",
            DomainError::Forbidden { .. } => "forbidden",
            DomainError::Conflict { .. } => "conflict",
            DomainError::Internal { .. } => "internal_error",
            DomainError::Auth(e) => e.code(),
            DomainError::Token(e) => e.code(),
            DomainError::Media(e) => e.code(),
        }
    }
}
