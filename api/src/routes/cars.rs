//! Car catalog route handlers

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

use rr_core::repositories::{CarRepository, RentalRepository, UserRepository};
use rr_core::services::media::{MediaPurpose, MediaStore};
use rr_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::car::{car_details, CarCreatedResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::multipart::MultipartForm;

/// Handler for GET /api/cars
pub async fn list_available<U, C, R, M>(state: web::Data<AppState<U, C, R, M>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CarRepository + 'static,
    R: RentalRepository + 'static,
    M: MediaStore + 'static,
{
    match state.catalog_service.list_available().await {
        Ok(cars) => HttpResponse::Ok().json(cars),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /api/cars/mine
pub async fn list_mine<U, C, R, M>(
    state: web::Data<AppState<U, C, R, M>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CarRepository + 'static,
    R: RentalRepository + 'static,
    M: MediaStore + 'static,
{
    match state.catalog_service.list_mine(auth.user_id).await {
        Ok(cars) => HttpResponse::Ok().json(cars),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /api/cars/{car_id}
pub async fn get_car<U, C, R, M>(
    state: web::Data<AppState<U, C, R, M>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CarRepository + 'static,
    R: RentalRepository + 'static,
    M: MediaStore + 'static,
{
    match state.catalog_service.get_detail(path.into_inner()).await {
        Ok(car) => HttpResponse::Ok().json(car),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for POST /api/cars
///
/// Multipart fields `make`, `model`, `year`, `type`, `dailyRate`,
/// `description` and a required `carImage` file.
pub async fn create_car<U, C, R, M>(
    state: web::Data<AppState<U, C, R, M>>,
    auth: AuthContext,
    payload: Multipart,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CarRepository + 'static,
    R: RentalRepository + 'static,
    M: MediaStore + 'static,
{
    let mut form = match MultipartForm::collect(payload).await {
        Ok(form) => form,
        Err(e) => return handle_domain_error(e),
    };

    let details = match car_details(&form) {
        Ok(details) => details,
        Err(e) => return handle_domain_error(e),
    };
    let image = form.take_file(MediaPurpose::CarImage.field_name());

    match state
        .catalog_service
        .add_listing(auth.user_id, details, image)
        .await
    {
        Ok(car) => HttpResponse::Created().json(CarCreatedResponse {
            message: "Car listed successfully".to_string(),
            car_id: car.id,
        }),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for DELETE /api/cars/{car_id}
pub async fn delete_car<U, C, R, M>(
    state: web::Data<AppState<U, C, R, M>>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CarRepository + 'static,
    R: RentalRepository + 'static,
    M: MediaStore + 'static,
{
    match state
        .catalog_service
        .delete_listing(path.into_inner(), auth.user_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Car deleted successfully")),
        Err(e) => handle_domain_error(e),
    }
}
