//! User repository trait defining the interface for account persistence.
//!
//! The trait is async-first and keeps the storage engine behind the
//! domain boundary; implementations translate store failures into
//! `DomainError::Internal`.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, ProfileUpdate, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use rr_core::domain::entities::user::{NewUser, ProfileUpdate, User};
/// use rr_core::errors::DomainError;
/// use rr_core::repositories::UserRepository;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn create(&self, user: NewUser) -> Result<User, DomainError> { unimplemented!() }
/// #   async fn update_profile(&self, id: i64, update: &ProfileUpdate) -> Result<Option<User>, DomainError> { Ok(None) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Check if a user exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user with its assigned id and timestamp
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    /// * `Err(DomainError)` - Any other failure
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Apply a partial profile update
    ///
    /// # Returns
    /// * `Ok(Some(User))` - The user after the update
    /// * `Ok(None)` - No user with this id
    /// * `Err(DomainError)` - Database error occurred
    async fn update_profile(
        &self,
        id: i64,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, DomainError>;
}
