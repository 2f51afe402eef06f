//! Rental route handlers
//!
//! Bookings accept either a JSON body or a multipart form carrying an
//! optional `proofOfPayment` image. Every other rental route is scoped to the
//! authenticated caller.

use actix_multipart::Multipart;
use actix_web::{dev, web, FromRequest, HttpMessage, HttpRequest, HttpResponse};

use rr_core::repositories::{CarRepository, RentalRepository, UserRepository};
use rr_core::services::media::{MediaPurpose, MediaStore, Upload};
use rr_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::rental::{CreateRentalRequest, RentalCreatedResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::multipart::MultipartForm;

/// Handler for POST /api/cars/rentals
///
/// # Request Body
///
/// ```json
/// {
///     "carId": 5,
///     "startDate": "2024-06-01",
///     "endDate": "2024-06-05",
///     "totalCost": 200,
///     "paymentMethod": "online"
/// }
/// ```
///
/// The same keys may be sent as multipart fields together with a
/// `proofOfPayment` file.
///
/// # Response
///
/// 201 with `{ "message", "rentalId", "status" }`; 400 when the dates are
/// invalid or overlap an active rental of the car.
pub async fn create_rental<U, C, R, M>(
    state: web::Data<AppState<U, C, R, M>>,
    auth: AuthContext,
    req: HttpRequest,
    payload: web::Payload,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CarRepository + 'static,
    R: RentalRepository + 'static,
    M: MediaStore + 'static,
{
    let (request, proof) = match read_booking(&req, payload).await {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    match state
        .rental_service
        .create_rental(auth.user_id, request.into(), proof)
        .await
    {
        Ok(rental) => HttpResponse::Created().json(RentalCreatedResponse {
            message: "Rental booked successfully".to_string(),
            rental_id: rental.id,
            status: rental.status,
        }),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /api/cars/rentals/{user_id}
pub async fn get_user_rentals<U, C, R, M>(
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
        .rental_service
        .get_user_rentals(auth.user_id, path.into_inner())
        .await
    {
        Ok(rentals) => HttpResponse::Ok().json(rentals),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /api/cars/rental/{rental_id}
pub async fn get_rental<U, C, R, M>(
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
        .rental_service
        .get_rental_by_id(path.into_inner(), auth.user_id)
        .await
    {
        Ok(rental) => HttpResponse::Ok().json(rental),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for PUT /api/cars/rental/{rental_id} and its `/upload` alias
pub async fn upload_payment<U, C, R, M>(
    state: web::Data<AppState<U, C, R, M>>,
    auth: AuthContext,
    path: web::Path<i64>,
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
    let proof = form.take_file(MediaPurpose::PaymentReceipt.field_name());

    match state
        .rental_service
        .upload_payment(path.into_inner(), auth.user_id, proof)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(
            "Payment proof uploaded successfully",
        )),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for DELETE /api/cars/rental/{rental_id}
pub async fn cancel_rental<U, C, R, M>(
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
        .rental_service
        .cancel_rental(path.into_inner(), auth.user_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Rental cancelled successfully")),
        Err(e) => handle_domain_error(e),
    }
}

/// Parse a booking from either a multipart form or a JSON body
///
/// The JSON branch goes through the `Json` extractor so the app's
/// `JsonConfig` size limit and error handler apply.
async fn read_booking(
    req: &HttpRequest,
    payload: web::Payload,
) -> Result<(CreateRentalRequest, Option<Upload>), HttpResponse> {
    if req.content_type().starts_with("multipart/form-data") {
        let mut form = MultipartForm::collect(Multipart::new(req.headers(), payload))
            .await
            .map_err(handle_domain_error)?;
        let request = CreateRentalRequest::from_form(&form).map_err(handle_domain_error)?;
        let proof = form.take_file(MediaPurpose::PaymentReceipt.field_name());
        Ok((request, proof))
    } else {
        let mut payload: dev::Payload = dev::Payload::Stream {
            payload: Box::pin(payload)
                as std::pin::Pin<
                    Box<
                        dyn futures_util::Stream<
                            Item = Result<web::Bytes, actix_web::error::PayloadError>,
                        >,
                    >,
                >,
        };
        let request = web::Json::<CreateRentalRequest>::from_request(req, &mut payload)
            .await
            .map_err(|e| e.error_response())?;
        Ok((request.into_inner(), None))
    }
}
