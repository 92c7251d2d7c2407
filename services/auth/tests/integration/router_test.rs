use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use fixoo_auth::infra::sms::{EskizSmsClient, SmsConfig};
use fixoo_auth::router::build_router;
use fixoo_auth::state::AppState;
use fixoo_auth::usecase::token::issue_token_pair;
use fixoo_domain::id::UserId;
use fixoo_domain::user::UserRole;
use fixoo_testing::auth::MockAuth;

use crate::helpers::{TEST_JWT_SECRET, TEST_PHONE, test_user};

/// Router over a disconnected database: anything that reaches storage fails,
/// so these tests cover only what is decided before that.
fn server() -> TestServer {
    let sms = EskizSmsClient::new(SmsConfig {
        base_url: "http://127.0.0.1:1".to_owned(),
        login: String::new(),
        password: String::new(),
        from: "4546".to_owned(),
    })
    .unwrap();
    let state = AppState {
        db: DatabaseConnection::default(),
        sms,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_healthz() {
    let resp = server().get("/healthz").await;
    assert_eq!(resp.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn should_report_unready_without_database() {
    let resp = server().get("/readyz").await;
    assert_eq!(resp.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_attach_request_id() {
    let resp = server().get("/healthz").await;
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_reject_me_without_token() {
    let resp = server().get("/auth/me").await;
    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_me_with_refresh_token() {
    let user = test_user(TEST_PHONE, UserRole::Student);
    let pair = issue_token_pair(&user, TEST_JWT_SECRET).unwrap();
    let bearer = HeaderValue::from_str(&format!("Bearer {}", pair.refresh_token)).unwrap();

    let resp = server()
        .get("/auth/me")
        .add_header(header::AUTHORIZATION, bearer)
        .await;
    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_phone_change_without_token() {
    let resp = server()
        .patch("/auth/phone")
        .json(&json!({ "new_phone": TEST_PHONE, "code": "123456" }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_validate_phone_before_storage() {
    let resp = server()
        .post("/auth/verification")
        .json(&json!({ "phone": "901234567", "type": "register" }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_validate_purpose_before_storage() {
    let resp = server()
        .post("/auth/verification")
        .json(&json!({ "phone": TEST_PHONE, "type": "login" }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_render_malformed_body_as_validation() {
    let resp = server()
        .post("/auth/verification/confirm")
        .json(&json!({ "phone": TEST_PHONE }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_garbage_refresh_token() {
    let resp = server()
        .post("/auth/token/refresh")
        .json(&json!({ "refresh_token": "garbage" }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<Value>()["kind"], "INVALID_REFRESH_TOKEN");
}

#[tokio::test]
async fn should_reject_access_token_on_refresh_endpoint() {
    let access = MockAuth::new(UserId::new(), UserRole::Student).access_token(TEST_JWT_SECRET);

    let resp = server()
        .post("/auth/token/refresh")
        .json(&json!({ "refresh_token": access }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_surface_storage_failure_as_internal() {
    let auth = MockAuth::new(UserId::new(), UserRole::Student);
    let resp = server()
        .get("/auth/me")
        .add_header(header::AUTHORIZATION, auth.bearer(TEST_JWT_SECRET))
        .await;

    assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.json::<Value>()["kind"], "INTERNAL");
}

#[tokio::test]
async fn should_echo_incoming_request_id() {
    let resp = server()
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-42"),
        )
        .await;
    assert_eq!(resp.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn should_require_token_for_password_change() {
    let resp = server()
        .patch("/auth/password")
        .json(&json!({
            "current_password": "secret123",
            "new_password": "brand-new",
            "confirm_password": "brand-new",
        }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_mismatched_password_confirmation_before_storage() {
    let auth = MockAuth::new(UserId::new(), UserRole::Student);
    let resp = server()
        .patch("/auth/password")
        .add_header(header::AUTHORIZATION, auth.bearer(TEST_JWT_SECRET))
        .json(&json!({
            "current_password": "secret123",
            "new_password": "brand-new",
            "confirm_password": "brand-old",
        }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "VALIDATION");
}
