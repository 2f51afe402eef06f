//! HTTP tests for registration, login and profile endpoints

mod common;

use actix_web::{http::Method, test};
use serde_json::{json, Value};

use common::{bearer, image, multipart_request, Harness};

#[actix_web::test]
async fn test_register_then_login() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "  Ada@Example.com ",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Registration successful");
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["firstName"], "Ada");
    let user_id = body["user"]["id"].as_i64().unwrap();
    let claims = h.tokens.verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.id, user_id);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["id"], user_id);
}

#[actix_web::test]
async fn test_duplicate_email_is_rejected() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;
    h.user("taken@example.com").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "taken@example.com",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "user_already_exists");
    assert_eq!(body["message"], "User already exists");
}

#[actix_web::test]
async fn test_register_validation() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "12345"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["password"].is_array());

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_blank_names_are_rejected() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "firstName": "   ",
            "lastName": "  ",
            "email": "ada@example.com",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["first_name"].is_array());
    assert!(body["details"]["last_name"].is_array());
    assert_eq!(h.db.user_count().await, 0);
}

#[actix_web::test]
async fn test_wrong_password_is_unauthorized() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "secret1"
        }))
        .to_request();
    test::call_service(&app, req).await;

    for (email, password) in [
        ("ada@example.com", "wrong-pass"),
        ("nobody@example.com", "secret1"),
        ("ada@example.com", ""),
        ("", ""),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[actix_web::test]
async fn test_current_user_requires_token() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;
    let (user_id, token) = h.user("me@example.com").await;

    let req = test::TestRequest::get().uri("/api/auth/user").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/auth/user")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["email"], "me@example.com");
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn test_profile_update_with_license() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;
    let (_, token) = h.user("driver@example.com").await;

    let req = multipart_request(
        Method::PUT,
        "/api/auth/profile",
        &token,
        &[("firstName", "Grace"), ("lastName", "  ")],
        Some(image("driverLicense")),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["first_name"], "Grace");
    assert_eq!(body["last_name"], "User");
    let license = body["driver_license_url"].as_str().unwrap();
    assert!(license.starts_with("/uploads/driverLicense-"));
    assert!(h.media.contains(license).await);
}
