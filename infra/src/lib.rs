//! # Infrastructure Layer
//!
//! Concrete implementations of the `rr_core` repository and storage seams:
//!
//! - **Database**: MySQL repositories using SQLx, connection pool and migrations
//! - **Storage**: local-disk store for uploaded images
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Storage module - uploaded file persistence
pub mod storage;

#[cfg(feature = "mysql")]
pub use database::{
    DatabasePool, MySqlCarRepository, MySqlRentalRepository, MySqlUserRepository,
};
pub use storage::LocalMediaStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
