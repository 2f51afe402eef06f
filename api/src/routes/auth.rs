//! Authentication route handlers
//!
//! - `POST /api/auth/register` creates an account and returns a token
//! - `POST /api/auth/login` exchanges credentials for a token
//! - `GET /api/auth/user` returns the caller
//! - `PUT /api/auth/profile` updates names and the driver license image

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use validator::Validate;

use rr_core::repositories::{CarRepository, RentalRepository, UserRepository};
use rr_core::services::media::{MediaPurpose, MediaStore};

use crate::app::AppState;
use crate::dto::auth::{profile_changes, AuthResponse, LoginRequest, RegisterRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AuthContext;
use crate::multipart::MultipartForm;

/// Handler for POST /api/auth/register
///
/// # Request Body
///
/// ```json
/// {
///     "firstName": "Ada",
///     "lastName": "Lovelace",
///     "email": "ada@example.com",
///     "password": "secret1"
/// }
/// ```
///
/// # Response
///
/// 201 with `{ "message", "user": { "id", "email", "firstName", "lastName" }, "token" }`;
/// 400 when the body is invalid or the email is taken.
pub async fn register<U, C, R, M>(
    state: web::Data<AppState<U, C, R, M>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CarRepository + 'static,
    R: RentalRepository + 'static,
    M: MediaStore + 'static,
{
    let request = request.into_inner().normalized();
    if let Err(errors) = request.validate() {
        tracing::warn!(errors = %errors, "Registration request failed validation");
        return validation_error_response(&errors);
    }

    match state.auth_service.register(request.into()).await {
        Ok(session) => {
            HttpResponse::Created().json(AuthResponse::new("Registration successful", &session))
        }
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for POST /api/auth/login
pub async fn login<U, C, R, M>(
    state: web::Data<AppState<U, C, R, M>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CarRepository + 'static,
    R: RentalRepository + 'static,
    M: MediaStore + 'static,
{
    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(session) => HttpResponse::Ok().json(AuthResponse::new("Login successful", &session)),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /api/auth/user
pub async fn get_user<U, C, R, M>(
    state: web::Data<AppState<U, C, R, M>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CarRepository + 'static,
    R: RentalRepository + 'static,
    M: MediaStore + 'static,
{
    match state.auth_service.get_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for PUT /api/auth/profile
///
/// Multipart fields `firstName` and `lastName` are optional; a
/// `driverLicense` image replaces the stored license.
pub async fn update_profile<U, C, R, M>(
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

    let license = form.take_file(MediaPurpose::DriverLicense.field_name());

    match state
        .auth_service
        .update_profile(auth.user_id, profile_changes(&form), license)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => handle_domain_error(e),
    }
}
