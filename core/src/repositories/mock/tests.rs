//! Behavioural tests for the in-memory repositories

use chrono::NaiveDate;

use super::MockDatabase;
use crate::domain::entities::rental::{NewRental, RentalStatus};
use crate::domain::entities::user::NewUser;
use crate::domain::value_objects::DateRange;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{CarRepository, RentalRepository, UserRepository};

fn period(start: &str, end: &str) -> DateRange {
    DateRange::new(
        NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
        NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
    )
    .unwrap()
}

fn booking(user_id: i64, car_id: i64, range: DateRange) -> NewRental {
    NewRental {
        user_id,
        car_id,
        period: range,
        total_cost: 100.0,
        status: RentalStatus::Pending,
        payment_method: None,
        proof_of_payment_url: None,
    }
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let db = MockDatabase::new();
    let user = NewUser::new("Ada", "Lovelace", "ada@example.com", "hash".to_string());

    db.create(user.clone()).await.unwrap();
    let result = db.create(user).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
async fn test_overlapping_reservation_is_rejected_without_insert() {
    let db = MockDatabase::new();
    let car = db.seed_car(None, "Toyota", "Corolla", 40.0).await;

    db.create_if_available(booking(1, car.id, period("2024-06-01", "2024-06-05")))
        .await
        .unwrap();
    let result = db
        .create_if_available(booking(2, car.id, period("2024-06-05", "2024-06-09")))
        .await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    assert_eq!(db.rental_count().await, 1);
}

#[tokio::test]
async fn test_reservation_for_missing_car() {
    let db = MockDatabase::new();
    let result = db
        .create_if_available(booking(1, 99, period("2024-06-01", "2024-06-02")))
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_owned_respects_owner_and_references() {
    let db = MockDatabase::new();
    let owned = db.seed_car(Some(1), "Honda", "Civic", 35.0).await;
    let booked = db.seed_car(Some(1), "Ford", "Focus", 30.0).await;
    db.create_if_available(booking(2, booked.id, period("2024-07-01", "2024-07-02")))
        .await
        .unwrap();

    assert!(!db.delete_owned(owned.id, 2).await.unwrap());
    assert!(db.delete_owned(owned.id, 1).await.unwrap());
    assert!(db.find_car(owned.id).await.unwrap().is_none());
    assert!(matches!(
        db.delete_owned(booked.id, 1).await,
        Err(DomainError::Conflict { .. })
    ));
}

#[tokio::test]
async fn test_record_payment_skips_cancelled_and_foreign_rentals() {
    let db = MockDatabase::new();
    let car = db.seed_car(None, "Mazda", "3", 45.0).await;
    let rental = db
        .create_if_available(booking(1, car.id, period("2024-08-01", "2024-08-03")))
        .await
        .unwrap();

    assert!(!db.record_payment(rental.id, 2, "/uploads/p.png").await.unwrap());
    assert!(db.record_payment(rental.id, 1, "/uploads/p.png").await.unwrap());
    assert_eq!(
        db.rental(rental.id).await.unwrap().status,
        RentalStatus::Paid
    );

    assert!(db.cancel(rental.id, 1).await.unwrap());
    assert!(!db.record_payment(rental.id, 1, "/uploads/q.png").await.unwrap());
    assert_eq!(
        db.rental(rental.id).await.unwrap().status,
        RentalStatus::Cancelled
    );
}

#[tokio::test]
async fn test_failing_database_surfaces_internal_error() {
    let db = MockDatabase::new();
    db.set_failing(true);

    assert!(matches!(
        db.list_available().await,
        Err(DomainError::Internal { .. })
    ));
}
