//! Unit tests for catalog service

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::entities::car::CarDetails;
use crate::domain::entities::rental::{NewRental, RentalStatus};
use crate::domain::entities::user::NewUser;
use crate::domain::value_objects::DateRange;
use crate::errors::{DomainError, MediaError};
use crate::repositories::{MockDatabase, RentalRepository, UserRepository};
use crate::services::catalog::CatalogService;
use crate::services::media::{MediaIntake, MockMediaStore, Upload};

fn service() -> (
    Arc<MockDatabase>,
    Arc<MockMediaStore>,
    CatalogService<MockDatabase, MockMediaStore>,
) {
    let db = Arc::new(MockDatabase::new());
    let media = Arc::new(MockMediaStore::new());
    let catalog = CatalogService::new(db.clone(), Arc::new(MediaIntake::new(media.clone())));
    (db, media, catalog)
}

fn details() -> CarDetails {
    CarDetails {
        make: "Tesla".to_string(),
        model: "Model 3".to_string(),
        year: 2022,
        car_type: "Sedan".to_string(),
        daily_rate: 90.0,
        description: Some("Long range".to_string()),
    }
}

fn image() -> Option<Upload> {
    Some(Upload::new(Some("car.png".to_string()), "image/png", vec![1, 2, 3]))
}

async fn owner(db: &MockDatabase) -> i64 {
    db.create(NewUser::new("Olga", "Owner", "olga@example.com", "hash".to_string()))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_add_listing_and_list_mine() {
    let (db, media, catalog) = service();
    let owner_id = owner(&db).await;

    let car = catalog.add_listing(owner_id, details(), image()).await.unwrap();

    assert!(car.is_available);
    assert_eq!(car.owner_id, Some(owner_id));
    assert!(media.contains(car.image_url.as_deref().unwrap()).await);

    let mine = catalog.list_mine(owner_id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, car.id);
    assert!(catalog.list_mine(owner_id + 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_listing_requires_image() {
    let (db, _, catalog) = service();
    let owner_id = owner(&db).await;

    let result = catalog.add_listing(owner_id, details(), None).await;

    assert!(matches!(
        result,
        Err(DomainError::Media(MediaError::MissingFile { .. }))
    ));
}

#[tokio::test]
async fn test_add_listing_validates_before_storing() {
    let (db, media, catalog) = service();
    let owner_id = owner(&db).await;
    let mut bad = details();
    bad.daily_rate = -5.0;

    let result = catalog.add_listing(owner_id, bad, image()).await;

    assert!(matches!(result, Err(DomainError::Validation { .. })));
    assert_eq!(media.stored_count().await, 0);
}

#[tokio::test]
async fn test_list_available_hides_unavailable_cars() {
    let (db, _, catalog) = service();
    let shown = db.seed_car(None, "Kia", "Rio", 25.0).await;
    let hidden = db.seed_car(None, "Kia", "Soul", 30.0).await;
    db.set_car_available(hidden.id, false).await;

    let cars = catalog.list_available().await.unwrap();

    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].id, shown.id);
    // Detail lookup does not filter on availability
    assert_eq!(catalog.get_detail(hidden.id).await.unwrap().id, hidden.id);
}

#[tokio::test]
async fn test_get_detail_not_found() {
    let (_, _, catalog) = service();

    assert!(matches!(
        catalog.get_detail(12).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_listing_rules() {
    let (db, _, catalog) = service();
    let owner_id = owner(&db).await;
    let car = catalog.add_listing(owner_id, details(), image()).await.unwrap();
    let rented = catalog.add_listing(owner_id, details(), image()).await.unwrap();
    db.create_if_available(NewRental {
        user_id: owner_id,
        car_id: rented.id,
        period: DateRange::new(
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
        )
        .unwrap(),
        total_cost: 180.0,
        status: RentalStatus::Pending,
        payment_method: None,
        proof_of_payment_url: None,
    })
    .await
    .unwrap();

    // Someone else's car looks missing
    assert!(matches!(
        catalog.delete_listing(car.id, owner_id + 1).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        catalog.delete_listing(rented.id, owner_id).await,
        Err(DomainError::Conflict { .. })
    ));

    catalog.delete_listing(car.id, owner_id).await.unwrap();
    assert!(matches!(
        catalog.get_detail(car.id).await,
        Err(DomainError::NotFound { .. })
    ));
}
