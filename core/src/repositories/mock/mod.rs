//! In-memory implementation of every repository for testing
//!
//! A single `MockDatabase` backs users, cars and rentals so that
//! cross-table rules (rental references blocking a car delete, the join
//! used for rental listings) behave as they do in MySQL.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::car::{Car, NewCar};
use crate::domain::entities::rental::{
    NewRental, Rental, RentalStatus, RentalWithCar, ONLINE_PAYMENT,
};
use crate::domain::entities::user::{NewUser, ProfileUpdate, User};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{CarRepository, RentalRepository, UserRepository};

#[cfg(test)]
mod tests;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    cars: BTreeMap<i64, Car>,
    rentals: BTreeMap<i64, Rental>,
    next_user_id: i64,
    next_car_id: i64,
    next_rental_id: i64,
}

impl Tables {
    fn join(&self, rental: &Rental) -> Option<RentalWithCar> {
        self.cars.get(&rental.car_id).map(|car| RentalWithCar {
            rental: rental.clone(),
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year,
            car_type: car.car_type.clone(),
            daily_rate: car.daily_rate,
            image_url: car.image_url.clone(),
        })
    }
}

/// Mock database shared by all repository traits
#[derive(Clone, Default)]
pub struct MockDatabase {
    tables: Arc<RwLock<Tables>>,
    failing: Arc<AtomicBool>,
}

impl MockDatabase {
    /// Create an empty mock database
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail like an unreachable store
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock database unavailable"));
        }
        Ok(())
    }

    /// Insert a car directly, bypassing validation
    pub async fn seed_car(
        &self,
        owner_id: Option<i64>,
        make: &str,
        model: &str,
        daily_rate: f64,
    ) -> Car {
        let mut tables = self.tables.write().await;
        tables.next_car_id += 1;
        let car = Car {
            id: tables.next_car_id,
            make: make.to_string(),
            model: model.to_string(),
            year: 2020,
            car_type: "Sedan".to_string(),
            daily_rate,
            image_url: Some(format!("/uploads/carImage-{}.png", tables.next_car_id)),
            is_available: true,
            owner_id,
            description: None,
            created_at: Utc::now(),
        };
        tables.cars.insert(car.id, car.clone());
        car
    }

    /// Flip a car's availability flag
    pub async fn set_car_available(&self, car_id: i64, available: bool) {
        if let Some(car) = self.tables.write().await.cars.get_mut(&car_id) {
            car.is_available = available;
        }
    }

    /// Raw rental row, regardless of owner
    pub async fn rental(&self, rental_id: i64) -> Option<Rental> {
        self.tables.read().await.rentals.get(&rental_id).cloned()
    }

    pub async fn rental_count(&self) -> usize {
        self.tables.read().await.rentals.len()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl UserRepository for MockDatabase {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        // Unique index on email
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        tables.next_user_id += 1;
        let created = User {
            id: tables.next_user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            driver_license_url: None,
            created_at: Utc::now(),
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: i64,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&id).map(|user| {
            update.apply_to(user);
            user.clone()
        }))
    }
}

#[async_trait]
impl CarRepository for MockDatabase {
    async fn list_available(&self) -> Result<Vec<Car>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .cars
            .values()
            .rev()
            .filter(|c| c.is_available)
            .cloned()
            .collect())
    }

    async fn find_car(&self, id: i64) -> Result<Option<Car>, DomainError> {
        self.check_available()?;
        Ok(self.tables.read().await.cars.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Car>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .cars
            .values()
            .rev()
            .filter(|c| c.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn insert_car(&self, car: NewCar) -> Result<Car, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&car.owner_id) {
            return Err(DomainError::not_found("User"));
        }

        tables.next_car_id += 1;
        let created = Car {
            id: tables.next_car_id,
            make: car.details.make,
            model: car.details.model,
            year: car.details.year,
            car_type: car.details.car_type,
            daily_rate: car.details.daily_rate,
            image_url: Some(car.image_url),
            is_available: true,
            owner_id: Some(car.owner_id),
            description: car.details.description,
            created_at: Utc::now(),
        };
        tables.cars.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete_owned(&self, car_id: i64, owner_id: i64) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        match tables.cars.get(&car_id) {
            Some(car) if car.is_owned_by(owner_id) => {}
            _ => return Ok(false),
        }

        // Foreign key from rentals.car_id
        if tables.rentals.values().any(|r| r.car_id == car_id) {
            return Err(DomainError::conflict(
                "Car has rentals and cannot be deleted",
            ));
        }

        tables.cars.remove(&car_id);
        Ok(true)
    }
}

#[async_trait]
impl RentalRepository for MockDatabase {
    async fn create_if_available(&self, rental: NewRental) -> Result<Rental, DomainError> {
        self.check_available()?;
        // Check and insert under one write lock
        let mut tables = self.tables.write().await;

        if !tables.cars.contains_key(&rental.car_id) {
            return Err(DomainError::not_found("Car"));
        }

        if tables
            .rentals
            .values()
            .any(|existing| existing.blocks(rental.car_id, &rental.period))
        {
            return Err(DomainError::dates_unavailable());
        }

        tables.next_rental_id += 1;
        let created = Rental {
            id: tables.next_rental_id,
            user_id: rental.user_id,
            car_id: rental.car_id,
            start_date: rental.period.start(),
            end_date: rental.period.end(),
            total_cost: rental.total_cost,
            status: rental.status,
            payment_method: rental.payment_method,
            proof_of_payment_url: rental.proof_of_payment_url,
            created_at: Utc::now(),
        };
        tables.rentals.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<RentalWithCar>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut rentals: Vec<RentalWithCar> = tables
            .rentals
            .values()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| tables.join(r))
            .collect();
        rentals.sort_by(|a, b| b.rental.start_date.cmp(&a.rental.start_date));
        Ok(rentals)
    }

    async fn find_for_user(
        &self,
        rental_id: i64,
        user_id: i64,
    ) -> Result<Option<RentalWithCar>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .rentals
            .get(&rental_id)
            .filter(|r| r.user_id == user_id)
            .and_then(|r| tables.join(r)))
    }

    async fn record_payment(
        &self,
        rental_id: i64,
        user_id: i64,
        proof_url: &str,
    ) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables.rentals.get_mut(&rental_id) {
            Some(rental) if rental.user_id == user_id && rental.status.is_active() => {
                rental.proof_of_payment_url = Some(proof_url.to_string());
                rental.status = RentalStatus::Paid;
                rental.payment_method = Some(ONLINE_PAYMENT.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn cancel(&self, rental_id: i64, user_id: i64) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables.rentals.get_mut(&rental_id) {
            Some(rental) if rental.user_id == user_id => {
                rental.status = RentalStatus::Cancelled;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
