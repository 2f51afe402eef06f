use actix_web::{
    error::{JsonPayloadError, PathError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use rr_core::errors::{DomainError, ErrorKind};
use rr_shared::ErrorResponse;
use validator::ValidationErrors;

/// HTTP status for each error class; conflicts answer 400 like other rejected input
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let kind = error.kind();

    let message = match &error {
        DomainError::NotFound { resource } => format!("{} not found", resource),
        DomainError::Validation { message }
        | DomainError::Forbidden { message }
        | DomainError::Conflict { message } => message.clone(),
        _ if kind == ErrorKind::ServerError => "An internal error occurred".to_string(),
        other => other.to_string(),
    };

    if kind == ErrorKind::ServerError {
        tracing::error!(error = %error, "Request failed");
    } else {
        tracing::debug!(error = %error, code = error.code(), "Request rejected");
    }

    HttpResponse::build(status_for(kind)).json(ErrorResponse::new(error.code(), message))
}

/// 400 body listing the fields that failed validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new("validation_error", "Invalid request body");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.with_detail(field, serde_json::json!(messages));
    }

    HttpResponse::BadRequest().json(response)
}

/// Turn JSON extractor failures into the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::new("validation_error", format!("Invalid JSON body: {}", err));
    actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
        .into()
}

/// Turn unparsable path segments (`/api/cars/abc`) into the standard error body
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected path parameters");
    let body = ErrorResponse::new("invalid_path", format!("Invalid path parameter: {}", err));
    actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
        .into()
}
