//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use rr_core::domain::entities::user::{NewUser, ProfileUpdate, User};
use rr_core::errors::{AuthError, DomainError};
use rr_core::repositories::UserRepository;

use super::{db_error, is_unique_violation};

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::internal(format!("Failed to get {}: {}", name, e))
        };

        Ok(User {
            id: row.try_get("user_id").map_err(|e| column("user_id", e))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| column("first_name", e))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| column("last_name", e))?,
            email: row.try_get("email").map_err(|e| column("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column("password_hash", e))?,
            driver_license_url: row
                .try_get("driver_license_url")
                .map_err(|e| column("driver_license_url", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT user_id, first_name, last_name, email, password_hash,
                   driver_license_url, created_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load user by email", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT user_id, first_name, last_name, email, password_hash,
                   driver_license_url, created_at
            FROM users
            WHERE user_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load user by id", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check email", e))?;

        Ok(count > 0)
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Auth(AuthError::UserAlreadyExists)
            } else {
                db_error("Failed to create user", e)
            }
        })?;

        let id = result.last_insert_id() as i64;
        tracing::debug!(user_id = id, "Inserted user");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::internal("Inserted user could not be read back"))
    }

    async fn update_profile(
        &self,
        id: i64,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, DomainError> {
        sqlx::query(
            r#"
            UPDATE users
            SET first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                driver_license_url = COALESCE(?, driver_license_url)
            WHERE user_id = ?
            "#,
        )
        .bind(update.first_name.as_deref())
        .bind(update.last_name.as_deref())
        .bind(update.driver_license_url.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update user profile", e))?;

        self.find_by_id(id).await
    }
}
