//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::user::{normalize_email, NewUser, ProfileUpdate, User};
use crate::domain::value_objects::AuthSession;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::media::{MediaIntake, MediaPurpose, MediaStore, Upload};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Name changes submitted with a profile update
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Authentication service for account registration, login and profiles
pub struct AuthService<U, M>
where
    U: UserRepository,
    M: MediaStore,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    /// Intake for driver license uploads
    media: Arc<MediaIntake<M>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, M> AuthService<U, M>
where
    U: UserRepository,
    M: MediaStore,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `media` - Upload intake for driver licenses
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        media: Arc<MediaIntake<M>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            media,
            config,
        }
    }

    /// Register a new account and issue its first token
    ///
    /// # Returns
    ///
    /// * `Ok(AuthSession)` - The created user and a signed token
    /// * `Err(AuthError::UserAlreadyExists)` - The email is taken
    pub async fn register(&self, input: RegisterUser) -> DomainResult<AuthSession> {
        let email = normalize_email(&input.email);
        if email.is_empty() || input.password.is_empty() {
            return Err(DomainError::validation("Email and password are required"));
        }

        if self.user_repository.exists_by_email(&email).await? {
            tracing::warn!(email = %email, "Registration rejected, email already in use");
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = hash_password(&input.password, self.config.bcrypt_cost).await?;
        // The unique index still guards against a concurrent registration
        let user = self
            .user_repository
            .create(NewUser::new(
                input.first_name,
                input.last_name,
                &email,
                password_hash,
            ))
            .await?;

        let issued = self.token_service.generate(user.id)?;
        tracing::info!(user_id = user.id, "User registered");

        Ok(AuthSession::new(user, issued.token, issued.expires_in))
    }

    /// Check credentials and issue a token
    ///
    /// An unknown email and a wrong password yield the same error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let email = normalize_email(email);

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::warn!(email = %email, "Login failed, unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !verify_password(password, &user.password_hash).await? {
            tracing::warn!(user_id = user.id, "Login failed, wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let issued = self.token_service.generate(user.id)?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(AuthSession::new(user, issued.token, issued.expires_in))
    }

    pub async fn get_user(&self, user_id: i64) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Update name fields and optionally attach a driver license image
    pub async fn update_profile(
        &self,
        user_id: i64,
        changes: ProfileChanges,
        license: Option<Upload>,
    ) -> DomainResult<User> {
        let current = self.get_user(user_id).await?;

        let license = self
            .media
            .accept_optional(MediaPurpose::DriverLicense, license)
            .await?;

        let update = ProfileUpdate {
            first_name: non_blank(changes.first_name),
            last_name: non_blank(changes.last_name),
            driver_license_url: license.as_ref().map(|m| m.reference.clone()),
        };

        if update.is_empty() {
            return Ok(current);
        }

        match self.user_repository.update_profile(user_id, &update).await {
            Ok(Some(user)) => {
                tracing::info!(
                    user_id,
                    license_uploaded = license.is_some(),
                    "Profile updated"
                );
                Ok(user)
            }
            Ok(None) => {
                if let Some(stored) = &license {
                    self.media.discard(stored).await;
                }
                Err(AuthError::UserNotFound.into())
            }
            Err(e) => {
                if let Some(stored) = &license {
                    self.media.discard(stored).await;
                }
                Err(e)
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
