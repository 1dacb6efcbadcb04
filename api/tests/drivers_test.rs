use actix_web::{http::header, http::StatusCode, test, web};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

use da_api::app::create_app;
use da_api::routes::drivers::AppState;
use da_core::repositories::{MockDeviceRepository, MockDriverRepository, MockDriverSearchRepository};
use da_core::services::verification::mock::{FixedClock, FixedCodeGenerator};
use da_core::services::verification::{VerificationService, VerificationServiceConfig};
use da_shared::config::{Environment, ServerConfig};

type TestState = AppState<MockDriverRepository, MockDeviceRepository, MockDriverSearchRepository>;

struct TestContext {
    state: web::Data<TestState>,
    clock: Arc<FixedClock>,
    drivers: Arc<MockDriverRepository>,
}

fn create_test_context() -> TestContext {
    let drivers = Arc::new(MockDriverRepository::new());
    let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2026, 5, 4, 8, 30, 0).unwrap()));

    let service = VerificationService::new(
        drivers.clone(),
        Arc::new(MockDeviceRepository::new()),
        Arc::new(MockDriverSearchRepository::new()),
        VerificationServiceConfig::default(),
    )
    .with_code_generator(Arc::new(FixedCodeGenerator::new("482913")))
    .with_clock(clock.clone());

    TestContext {
        state: web::Data::new(AppState {
            verification_service: Arc::new(service),
        }),
        clock,
        drivers,
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(create_app(
            $ctx.state.clone(),
            Environment::Development,
            &ServerConfig::default(),
        ))
        .await
    };
}

fn capture_request(body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/drivers-phonenumber-capture")
        .set_json(body)
}

fn verify_request(body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/drivers-verify-token")
        .set_json(body)
}

#[actix_web::test]
async fn test_capture_phone_creates_invited_driver() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        capture_request(json!({"firstName": "Ada", "phoneNumber": "+1 (401) 636-9040"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let location = resp
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body: Value = test::read_body_json(resp).await;

    let id = body["id"].as_str().unwrap();
    assert_eq!(location, format!("/api/drivers-phonenumber-capture/{}", id));
    assert_eq!(body["status"], "INVITED");
    assert_eq!(body["phoneNumber"], "+14016369040");
    assert_eq!(body["firstName"], "Ada");
    assert!(body.get("oneTimeCode").is_none());

    let stored = ctx.drivers.get(id).await.unwrap();
    assert_eq!(stored.one_time_code.as_deref(), Some("482913"));
}

#[actix_web::test]
async fn test_capture_phone_rejections() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let cases = [
        (json!({"id": "d1", "phoneNumber": "+14016369040"}), "idexists"),
        (json!({"phoneNumber": "12"}), "invalidPhone"),
        (json!({"phoneNumber": "+14016369040", "email": "nope"}), "validation_error"),
    ];

    for (body, reason) in cases {
        let resp = test::call_service(&app, capture_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], reason);
    }
}

#[actix_web::test]
async fn test_verify_token_confirms_driver_once() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(&app, capture_request(json!({"phoneNumber": "+14016369040"})).to_request()).await;
    let invited: Value = test::read_body_json(resp).await;
    let id = invited["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        verify_request(json!({"id": id, "oneTimeCode": "482913", "deviceId": "pixel-8", "extra": "ignored"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        format!("/api/drivers-verify-token/{}", id).as_str()
    );

    let confirmed: Value = test::read_body_json(resp).await;
    assert_eq!(confirmed["status"], "CONFIRMED");
    assert_eq!(confirmed["devices"].as_array().unwrap().len(), 1);
    assert_eq!(confirmed["devices"][0]["deviceId"], "pixel-8");
    assert!(confirmed.get("oneTimeCode").is_none());

    let resp = test::call_service(&app, verify_request(json!({"id": id, "oneTimeCode": "482913"})).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "alreadyConfirmed");
}

#[actix_web::test]
async fn test_verify_token_error_statuses() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(&app, capture_request(json!({"phoneNumber": "+14016369040"})).to_request()).await;
    let invited: Value = test::read_body_json(resp).await;
    let id = invited["id"].as_str().unwrap().to_string();

    let cases = [
        (json!({"oneTimeCode": "482913"}), StatusCode::BAD_REQUEST, "idnotpresent"),
        (json!({"id": "missing", "oneTimeCode": "482913"}), StatusCode::NOT_FOUND, "idnotfound"),
        (json!({"id": id, "oneTimeCode": "000000"}), StatusCode::BAD_REQUEST, "codeMisMatch"),
        (json!({"id": id}), StatusCode::BAD_REQUEST, "codeMisMatch"),
    ];

    for (body, status, reason) in cases {
        let resp = test::call_service(&app, verify_request(body).to_request()).await;
        assert_eq!(resp.status(), status);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], reason);
    }

    ctx.clock.advance(Duration::minutes(30));
    let resp = test::call_service(&app, verify_request(json!({"id": id, "oneTimeCode": "482913"})).to_request()).await;
    assert_eq!(resp.status(), StatusCode::GONE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "codeExpired");
}

#[actix_web::test]
async fn test_malformed_body_is_validation_error() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/drivers-verify-token")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
}

#[actix_web::test]
async fn test_health_and_unknown_route() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/drivers").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_verify_token_rejects_oversized_device_id() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(&app, capture_request(json!({"phoneNumber": "+14016369040"})).to_request()).await;
    let invited: Value = test::read_body_json(resp).await;
    let id = invited["id"].as_str().unwrap().to_string();

    let long_device = "d".repeat(300);
    let resp = test::call_service(
        &app,
        verify_request(json!({"id": id, "oneTimeCode": "482913", "deviceId": long_device})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalidDeviceId");

    let stored = ctx.drivers.get(&id).await.unwrap();
    assert_eq!(stored.status.to_string(), "INVITED");
    assert!(stored.devices.is_empty());

    // Missing id is still reported first
    let resp = test::call_service(
        &app,
        verify_request(json!({"oneTimeCode": "482913", "deviceId": "d".repeat(300)})).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "idnotpresent");
}
