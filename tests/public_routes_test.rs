mod common;

use actix_web::test;
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn health_endpoint_reports_service_statuses() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    // Overall status depends on what is reachable from the test environment;
    // the endpoint itself always answers 200 with a per-service breakdown.
    assert!(body["status"] == "ok" || body["status"] == "degraded");
    assert!(body["services"]["mongodb"].is_object());
    assert!(body["services"]["gemini"].is_object());
    assert!(body["services"]["auth"].is_object());
}
