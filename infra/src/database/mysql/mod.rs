//! MySQL repository implementations

mod car_repository_impl;
mod rental_repository_impl;
mod user_repository_impl;


pub use car_repository_impl::MySqlCarRepository;
pub use rental_repository_impl::MySqlRentalRepository;
pub use user_repository_impl::MySqlUserRepository;

use rr_core::errors::DomainError;

/// Log a store failure and hide it behind `DomainError::Internal`
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::internal(format!("{}: {}", context, e))
}

/// Whether the error is a foreign key violation (MySQL 1451/1452)
pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

/// Whether the error is a duplicate key violation (MySQL 1062)
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
