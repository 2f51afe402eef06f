//! HTTP tests for the car catalog endpoints

mod common;

use actix_web::{http::Method, test};
use serde_json::{json, Value};

use common::{bearer, image, multipart_request, FilePart, Harness};

const LISTING: &[(&str, &str)] = &[
    ("make", "Honda"),
    ("model", "Civic"),
    ("year", "2022"),
    ("type", "Sedan"),
    ("dailyRate", "45.5"),
    ("description", "Clean and quiet"),
];

#[actix_web::test]
async fn test_public_listing_and_detail() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;
    let older = h.car(None).await;
    let newer = h.car(None).await;
    let hidden = h.car(None).await;
    h.db.set_car_available(hidden.id, false).await;

    let req = test::TestRequest::get().uri("/api/cars").to_request();
    let cars: Value = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<i64> = cars
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["car_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert_eq!(cars[0]["type"], "Sedan");

    let req = test::TestRequest::get()
        .uri(&format!("/api/cars/{}", older.id))
        .to_request();
    let car: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(car["make"], "Toyota");

    let req = test::TestRequest::get().uri("/api/cars/9999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_add_listing_and_list_mine() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;
    let (owner_id, token) = h.user("owner@example.com").await;
    h.car(None).await;

    let req = multipart_request(Method::POST, "/api/cars", &token, LISTING, Some(image("carImage")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Car listed successfully");
    let car_id = body["carId"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/cars/mine")
        .insert_header(bearer(&token))
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["car_id"], car_id);
    assert_eq!(mine[0]["owner_id"], owner_id);
    assert_eq!(mine[0]["daily_rate"], 45.5);
    assert_eq!(mine[0]["is_available"], true);
    assert!(h.media.contains(mine[0]["image_url"].as_str().unwrap()).await);
}

#[actix_web::test]
async fn test_add_listing_rejects_bad_uploads() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;
    let (_, token) = h.user("owner@example.com").await;

    let req = multipart_request(Method::POST, "/api/cars", &token, LISTING, None).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "missing_file");

    let pdf = FilePart {
        field: "carImage",
        file_name: "brochure.pdf",
        content_type: "application/pdf",
        bytes: b"%PDF-1.4",
    };
    let req = multipart_request(Method::POST, "/api/cars", &token, LISTING, Some(pdf)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unsupported_content_type");

    let bad_rate = [
        ("make", "Honda"),
        ("model", "Civic"),
        ("year", "2022"),
        ("type", "Sedan"),
        ("dailyRate", "0"),
    ];
    let req = multipart_request(Method::POST, "/api/cars", &token, &bad_rate, Some(image("carImage")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    assert_eq!(h.media.stored_count().await, 0);
}

#[actix_web::test]
async fn test_owner_routes_require_token() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;
    let car = h.car(None).await;

    let req = test::TestRequest::get().uri("/api/cars/mine").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/cars/{}", car.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_delete_listing_rules() {
    let h = Harness::new();
    let app = test::init_service(h.app()).await;
    let (owner_id, owner_token) = h.user("owner@example.com").await;
    let (_, renter_token) = h.user("renter@example.com").await;
    let rented = h.car(Some(owner_id)).await;
    let idle = h.car(Some(owner_id)).await;

    let req = test::TestRequest::post()
        .uri("/api/cars/rentals")
        .insert_header(bearer(&renter_token))
        .set_json(json!({
            "carId": rented.id,
            "startDate": "2024-07-01",
            "endDate": "2024-07-03",
            "totalCost": 120
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    // Someone else's car reads as missing
    let req = test::TestRequest::delete()
        .uri(&format!("/api/cars/{}", idle.id))
        .insert_header(bearer(&renter_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/cars/{}", rented.id))
        .insert_header(bearer(&owner_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "conflict");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/cars/{}", idle.id))
        .insert_header(bearer(&owner_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/cars/{}", idle.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_uploaded_files_are_served() {
    let h = Harness::new();
    std::fs::write(h.upload_path().join("carImage-1.png"), b"png-bytes").unwrap();
    let app = test::init_service(h.app()).await;

    let req = test::TestRequest::get()
        .uri("/uploads/carImage-1.png")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(test::read_body(resp).await.as_ref(), b"png-bytes");

    let req = test::TestRequest::get().uri("/uploads/missing.png").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}
