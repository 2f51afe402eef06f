use actix_web::HttpResponse;
use rr_shared::{ErrorResponse, HealthResponse};

/// Health check endpoint handler
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "rent-a-ride-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
