//! MySQL implementation of the RentalRepository trait.
//!
//! Reservations run in a transaction that locks the car row first, so two
//! bookings of the same car are serialized and the overlap check cannot be
//! raced by a concurrent insert.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{MySqlPool, Row};

use rr_core::domain::entities::rental::{
    NewRental, Rental, RentalStatus, RentalWithCar, ONLINE_PAYMENT,
};
use rr_core::errors::DomainError;
use rr_core::repositories::RentalRepository;

use super::db_error;

/// MySQL implementation of RentalRepository
pub struct MySqlRentalRepository {
    pool: MySqlPool,
}

impl MySqlRentalRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_rental(row: &sqlx::mysql::MySqlRow) -> Result<Rental, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::internal(format!("Failed to get {}: {}", name, e))
        };

        let status: String = row.try_get("status").map_err(|e| column("status", e))?;

        Ok(Rental {
            id: row.try_get("rental_id").map_err(|e| column("rental_id", e))?,
            user_id: row.try_get("user_id").map_err(|e| column("user_id", e))?,
            car_id: row.try_get("car_id").map_err(|e| column("car_id", e))?,
            start_date: row
                .try_get::<NaiveDate, _>("start_date")
                .map_err(|e| column("start_date", e))?,
            end_date: row
                .try_get::<NaiveDate, _>("end_date")
                .map_err(|e| column("end_date", e))?,
            total_cost: row
                .try_get("total_cost")
                .map_err(|e| column("total_cost", e))?,
            status: status.parse::<RentalStatus>()?,
            payment_method: row
                .try_get("payment_method")
                .map_err(|e| column("payment_method", e))?,
            proof_of_payment_url: row
                .try_get("proof_of_payment_url")
                .map_err(|e| column("proof_of_payment_url", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
        })
    }

    fn row_to_rental_with_car(row: &sqlx::mysql::MySqlRow) -> Result<RentalWithCar, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::internal(format!("Failed to get {}: {}", name, e))
        };

        Ok(RentalWithCar {
            rental: Self::row_to_rental(row)?,
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
        })
    }
}

#[async_trait]
impl RentalRepository for MySqlRentalRepository {
    async fn create_if_available(&self, rental: NewRental) -> Result<Rental, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin rental transaction", e))?;

        // Serializes reservations per car until commit
        let car: Option<i64> =
            sqlx::query_scalar("SELECT car_id FROM cars WHERE car_id = ? FOR UPDATE")
                .bind(rental.car_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to lock car", e))?;

        if car.is_none() {
            return Err(DomainError::not_found("Car"));
        }

        let overlapping: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM rentals
            WHERE car_id = ?
              AND status <> 'cancelled'
              AND start_date <= ?
              AND end_date >= ?
            "#,
        )
        .bind(rental.car_id)
        .bind(rental.period.end())
        .bind(rental.period.start())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to check rental overlap", e))?;

        if overlapping > 0 {
            tracing::debug!(car_id = rental.car_id, overlapping, "Overlapping rentals found");
            return Err(DomainError::dates_unavailable());
        }

        let result = sqlx::query(
            r#"
            INSERT INTO rentals
                (user_id, car_id, start_date, end_date, total_cost, status,
                 payment_method, proof_of_payment_url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(rental.user_id)
        .bind(rental.car_id)
        .bind(rental.period.start())
        .bind(rental.period.end())
        .bind(rental.total_cost)
        .bind(rental.status.as_str())
        .bind(rental.payment_method.as_deref())
        .bind(rental.proof_of_payment_url.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert rental", e))?;

        let id = result.last_insert_id() as i64;

        let row = sqlx::query(
            r#"
            SELECT rental_id, user_id, car_id, start_date, end_date, total_cost,
                   status, payment_method, proof_of_payment_url, created_at
            FROM rentals
            WHERE rental_id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to read inserted rental", e))?;
        let created = Self::row_to_rental(&row)?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit rental", e))?;

        tracing::debug!(rental_id = id, car_id = rental.car_id, "Inserted rental");
        Ok(created)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<RentalWithCar>, DomainError> {
        let query = r#"
            SELECT r.rental_id, r.user_id, r.car_id, r.start_date, r.end_date,
                   r.total_cost, r.status, r.payment_method, r.proof_of_payment_url,
                   r.created_at, c.make, c.model, c.year, c.type, c.daily_rate, c.image_url
            FROM rentals r
            JOIN cars c ON r.car_id = c.car_id
            WHERE r.user_id = ?
            ORDER BY r.start_date DESC, r.rental_id DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list user rentals", e))?;

        rows.iter().map(Self::row_to_rental_with_car).collect()
    }

    async fn find_for_user(
        &self,
        rental_id: i64,
        user_id: i64,
    ) -> Result<Option<RentalWithCar>, DomainError> {
        let query = r#"
            SELECT r.rental_id, r.user_id, r.car_id, r.start_date, r.end_date,
                   r.total_cost, r.status, r.payment_method, r.proof_of_payment_url,
                   r.created_at, c.make, c.model, c.year, c.type, c.daily_rate, c.image_url
            FROM rentals r
            JOIN cars c ON r.car_id = c.car_id
            WHERE r.rental_id = ? AND r.user_id = ?
        "#;

        let row = sqlx::query(query)
            .bind(rental_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load rental", e))?;

        row.as_ref().map(Self::row_to_rental_with_car).transpose()
    }

    async fn record_payment(
        &self,
        rental_id: i64,
        user_id: i64,
        proof_url: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET proof_of_payment_url = ?, status = 'paid', payment_method = ?
            WHERE rental_id = ? AND user_id = ? AND status <> 'cancelled'
            "#,
        )
        .bind(proof_url)
        .bind(ONLINE_PAYMENT)
        .bind(rental_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to record payment", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn cancel(&self, rental_id: i64, user_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE rentals SET status = 'cancelled' WHERE rental_id = ? AND user_id = ?",
        )
        .bind(rental_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to cancel rental", e))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // MySQL reports changed rows, so an already cancelled rental reads as 0
        let matched: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM rentals WHERE rental_id = ? AND user_id = ?",
        )
        .bind(rental_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to look up rental", e))?;

        Ok(matched > 0)
    }
}
