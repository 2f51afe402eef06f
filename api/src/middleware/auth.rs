//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware reads `Authorization: Bearer <token>`, verifies it with the
//! core `TokenService` and injects an [`AuthContext`] into the request
//! extensions. Handlers take `AuthContext` as an extractor and pass the user
//! id on to the services explicitly.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use rr_core::{
    domain::entities::token::Claims,
    errors::{DomainError, TokenError},
    services::token::TokenService,
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use crate::handlers::error::handle_domain_error;

/// Authenticated caller injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: i64,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.id }
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            let verified = extract_bearer_token(&req)
                .ok_or_else(|| DomainError::from(TokenError::MissingToken))
                .and_then(|token| token_service.verify(&token));

            match verified {
                Ok(claims) => {
                    req.extensions_mut().insert(AuthContext::from(claims));
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(e) => {
                    tracing::warn!(path = %req.path(), code = e.code(), "Rejected unauthenticated request");
                    let response = handle_domain_error(e);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};
    use rr_core::services::token::TokenServiceConfig;

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(TokenServiceConfig {
            jwt_secret: "middleware-test-secret".to_string(),
            expiry_seconds: 3600,
        }))
    }

    async fn whoami(auth: AuthContext) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "user_id": auth.user_id }))
    }

    #[actix_web::test]
    async fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[actix_web::test]
    async fn test_missing_token_is_rejected() {
        let app = test::init_service(
            App::new()
                .wrap(JwtAuth::new(token_service()))
                .route("/protected", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/protected").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "missing_token");
        assert_eq!(body["message"], "Not authorized, no token");
    }

    #[actix_web::test]
    async fn test_invalid_token_is_rejected() {
        let app = test::init_service(
            App::new()
                .wrap(JwtAuth::new(token_service()))
                .route("/protected", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, "Bearer invalid-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_valid_token_injects_context() {
        let tokens = token_service();
        let issued = tokens.generate(42).unwrap();

        let app = test::init_service(
            App::new()
                .wrap(JwtAuth::new(tokens))
                .route("/protected", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, format!("Bearer {}", issued.token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["user_id"], 42);
    }

    #[actix_web::test]
    async fn test_token_from_other_secret_is_rejected() {
        let foreign = TokenService::new(TokenServiceConfig {
            jwt_secret: "someone-else".to_string(),
            expiry_seconds: 3600,
        })
        .generate(7)
        .unwrap();

        let app = test::init_service(
            App::new()
                .wrap(JwtAuth::new(token_service()))
                .route("/protected", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, format!("Bearer {}", foreign.token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_signature");
    }
}
