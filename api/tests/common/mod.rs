//! Shared harness for the HTTP tests: the real app factory wired to the
//! in-memory database and media store.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    test, web, App, Error,
};
use tempfile::TempDir;

use rr_api::{create_app, AppState};
use rr_core::domain::entities::{Car, NewUser};
use rr_core::repositories::UserRepository;
use rr_core::services::auth::{AuthService, AuthServiceConfig};
use rr_core::services::catalog::CatalogService;
use rr_core::services::media::{MediaIntake, MockMediaStore};
use rr_core::services::rental::RentalService;
use rr_core::services::token::{TokenService, TokenServiceConfig};
use rr_core::MockDatabase;
use rr_shared::config::{CorsConfig, MediaConfig};

pub const BOUNDARY: &str = "----rentarideboundary";

pub type TestState = AppState<MockDatabase, MockDatabase, MockDatabase, MockMediaStore>;

pub struct Harness {
    pub state: web::Data<TestState>,
    pub db: MockDatabase,
    pub media: MockMediaStore,
    pub tokens: Arc<TokenService>,
    upload_dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        let db = MockDatabase::new();
        let media = MockMediaStore::new();
        let intake = Arc::new(MediaIntake::new(Arc::new(media.clone())));
        let tokens = Arc::new(TokenService::new(TokenServiceConfig {
            jwt_secret: "api-test-secret".to_string(),
            expiry_seconds: 3600,
        }));

        let state = web::Data::new(AppState {
            auth_service: Arc::new(AuthService::new(
                Arc::new(db.clone()),
                Arc::clone(&tokens),
                Arc::clone(&intake),
                AuthServiceConfig { bcrypt_cost: 4 },
            )),
            catalog_service: Arc::new(CatalogService::new(
                Arc::new(db.clone()),
                Arc::clone(&intake),
            )),
            rental_service: Arc::new(RentalService::new(
                Arc::new(db.clone()),
                Arc::clone(&intake),
            )),
            token_service: Arc::clone(&tokens),
        });

        Self {
            state,
            db,
            media,
            tokens,
            upload_dir: tempfile::tempdir().expect("temp upload dir"),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        create_app(
            self.state.clone(),
            &CorsConfig::default(),
            &MediaConfig::new(self.upload_dir.path(), "/uploads"),
        )
    }

    pub fn upload_path(&self) -> &std::path::Path {
        self.upload_dir.path()
    }

    /// Insert a user directly and sign a token for it
    pub async fn user(&self, email: &str) -> (i64, String) {
        let user = self
            .db
            .create(NewUser::new("Test", "User", email, "unused-hash".to_string()))
            .await
            .unwrap();
        let token = self.tokens.generate(user.id).unwrap().token;
        (user.id, token)
    }

    pub async fn car(&self, owner_id: Option<i64>) -> Car {
        self.db.seed_car(owner_id, "Toyota", "Corolla", 40.0).await
    }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// A file part of a multipart body
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

pub fn image<'a>(field: &'a str) -> FilePart<'a> {
    FilePart {
        field,
        file_name: "photo.png",
        content_type: "image/png",
        bytes: b"\x89PNG fake image",
    }
}

/// Encode a `multipart/form-data` body, returning its content type and bytes
pub fn multipart(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some(file) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                file.field, file.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

/// Build a request carrying a multipart body
pub fn multipart_request(
    method: actix_web::http::Method,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    file: Option<FilePart<'_>>,
) -> test::TestRequest {
    let (content_type, body) = multipart(fields, file);
    test::TestRequest::default()
        .method(method)
        .uri(uri)
        .insert_header(bearer(token))
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
}
