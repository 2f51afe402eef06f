//! MySQL implementation of the CarRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use rr_core::domain::entities::car::{Car, NewCar};
use rr_core::errors::DomainError;
use rr_core::repositories::CarRepository;

use super::{db_error, is_foreign_key_violation};

/// MySQL implementation of CarRepository
pub struct MySqlCarRepository {
    pool: MySqlPool,
}

impl MySqlCarRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_car(row: &sqlx::mysql::MySqlRow) -> Result<Car, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::internal(format!("Failed to get {}: {}", name, e))
        };

        Ok(Car {
            id: row.try_get("car_id").map_err(|e| column("car_id", e))?,
            make: row.try_get("make").map_err(|e| column("make", e))?,
            model: row.try_get("model").map_err(|e| column("model", e))?,
            year: row.try_get("year").map_err(|e| column("year", e))?,
            car_type: row.try_get("type").map_err(|e| column("type", e))?,
            daily_rate: row
                .try_get("daily_rate")
                .map_err(|e| column("daily_rate", e))?,
            image_url: row
                .try_get("image_url")
                .map_err(|e| column("image_url", e))?,
            is_available: row
                .try_get("is_available")
                .map_err(|e| column("is_available", e))?,
            owner_id: row.try_get("owner_id").map_err(|e| column("owner_id", e))?,
            description: row
                .try_get("description")
                .map_err(|e| column("description", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
        })
    }

    fn rows_to_cars(rows: &[sqlx::mysql::MySqlRow]) -> Result<Vec<Car>, DomainError> {
        rows.iter().map(Self::row_to_car).collect()
    }
}

#[async_trait]
impl CarRepository for MySqlCarRepository {
    async fn list_available(&self) -> Result<Vec<Car>, DomainError> {
        let query = r#"
            SELECT car_id, make, model, year, type, daily_rate, image_url,
                   is_available, owner_id, description, created_at
            FROM cars
            WHERE is_available = TRUE
            ORDER BY created_at DESC, car_id DESC
        "#;

        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list available cars", e))?;

        Self::rows_to_cars(&rows)
    }

    async fn find_car(&self, id: i64) -> Result<Option<Car>, DomainError> {
        let query = r#"
            SELECT car_id, make, model, year, type, daily_rate, image_url,
                   is_available, owner_id, description, created_at
            FROM cars
            WHERE car_id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load car", e))?;

        row.as_ref().map(Self::row_to_car).transpose()
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Car>, DomainError> {
        let query = r#"
            SELECT car_id, make, model, year, type, daily_rate, image_url,
                   is_available, owner_id, description, created_at
            FROM cars
            WHERE owner_id = ?
            ORDER BY created_at DESC, car_id DESC
        "#;

        let rows = sqlx::query(query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list owner cars", e))?;

        Self::rows_to_cars(&rows)
    }

    async fn insert_car(&self, car: NewCar) -> Result<Car, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO cars
                (make, model, year, type, daily_rate, image_url, is_available, owner_id, description)
            VALUES (?, ?, ?, ?, ?, ?, TRUE, ?, ?)
            "#,
        )
        .bind(&car.details.make)
        .bind(&car.details.model)
        .bind(car.details.year)
        .bind(&car.details.car_type)
        .bind(car.details.daily_rate)
        .bind(&car.image_url)
        .bind(car.owner_id)
        .bind(car.details.description.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::not_found("User")
            } else {
                db_error("Failed to insert car", e)
            }
        })?;

        let id = result.last_insert_id() as i64;
        tracing::debug!(car_id = id, owner_id = car.owner_id, "Inserted car");

        self.find_car(id)
            .await?
            .ok_or_else(|| DomainError::internal("Inserted car could not be read back"))
    }

    async fn delete_owned(&self, car_id: i64, owner_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM cars WHERE car_id = ? AND owner_id = ?")
            .bind(car_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    tracing::warn!(car_id, "Car delete blocked by existing rentals");
                    DomainError::conflict("Car has rentals and cannot be deleted")
                } else {
                    db_error("Failed to delete car", e)
                }
            })?;

        Ok(result.rows_affected() > 0)
    }
}
