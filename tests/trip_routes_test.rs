mod common;

use actix_web::test;
use bson::oid::ObjectId;
use serde_json::json;
use serial_test::serial;

use common::{auth_token, TestApp};

#[actix_rt::test]
#[serial]
async fn trip_routes_require_bearer_token() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let requests = vec![
        test::TestRequest::post()
            .uri("/api/trips/plan")
            .set_json(json!({
                "startDate": "2024-06-01T09:00:00Z",
                "endDate": "2024-06-01T18:00:00Z",
                "location": "Mumbai"
            }))
            .to_request(),
        test::TestRequest::get().uri("/api/trips").to_request(),
        test::TestRequest::get()
            .uri("/api/trips/507f1f77bcf86cd799439011")
            .to_request(),
        test::TestRequest::delete()
            .uri("/api/trips/507f1f77bcf86cd799439011")
            .to_request(),
        test::TestRequest::put()
            .uri("/api/trips/507f1f77bcf86cd799439011/favorite")
            .to_request(),
    ];

    for req in requests {
        let status = common::response_status(&app, req).await;
        assert_eq!(status, 401);
    }
}

#[actix_rt::test]
#[serial]
async fn plan_rejects_empty_fields() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = auth_token(&ObjectId::new().to_hex());

    let req = test::TestRequest::post()
        .uri("/api/trips/plan")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "startDate": "", "endDate": "", "location": "" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Start date, end date, and location are required"
    );
}

#[actix_rt::test]
#[serial]
async fn plan_rejects_unparseable_dates() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = auth_token(&ObjectId::new().to_hex());

    let req = test::TestRequest::post()
        .uri("/api/trips/plan")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({
            "startDate": "next tuesday",
            "endDate": "2024-06-01T18:00:00Z",
            "location": "Mumbai"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid start date");
}

#[actix_rt::test]
#[serial]
async fn plan_rejects_inverted_date_range() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = auth_token(&ObjectId::new().to_hex());

    let req = test::TestRequest::post()
        .uri("/api/trips/plan")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({
            "startDate": "2024-06-02T09:00:00Z",
            "endDate": "2024-06-01T09:00:00Z",
            "location": "Mumbai"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "End date must be after start date");
}

#[actix_rt::test]
#[serial]
async fn plan_rejects_equal_start_and_end() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = auth_token(&ObjectId::new().to_hex());

    let req = test::TestRequest::post()
        .uri("/api/trips/plan")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({
            "startDate": "2024-06-01T09:00:00Z",
            "endDate": "2024-06-01T09:00:00Z",
            "location": "Mumbai"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn get_trip_rejects_malformed_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = auth_token(&ObjectId::new().to_hex());

    let req = test::TestRequest::get()
        .uri("/api/trips/not-an-object-id")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid ID");
}

#[actix_rt::test]
#[serial]
async fn delete_trip_rejects_malformed_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = auth_token(&ObjectId::new().to_hex());

    let req = test::TestRequest::delete()
        .uri("/api/trips/not-an-object-id")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn favorite_rejects_malformed_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = auth_token(&ObjectId::new().to_hex());

    let req = test::TestRequest::put()
        .uri("/api/trips/not-an-object-id/favorite")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
