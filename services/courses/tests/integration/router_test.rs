use axum::http::{StatusCode, header};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use fixoo_courses::router::build_router;
use fixoo_courses::state::AppState;
use fixoo_domain::id::{CourseId, LessonId, QuestionId, SubmissionId, UserId};
use fixoo_domain::user::UserRole;
use fixoo_testing::auth::MockAuth;

use crate::helpers::TEST_JWT_SECRET;

/// Router over a disconnected database: anything that reaches storage fails,
/// so these tests cover only what is decided before that.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::default(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn mentor() -> MockAuth {
    MockAuth::new(UserId::new(), UserRole::Mentor)
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
async fn should_require_token_for_course_routes() {
    let course_id = CourseId::new();
    let resp = server()
        .get(&format!("/courses/{course_id}/entitlement"))
        .await;
    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);

    let resp = server()
        .delete(&format!("/lessons/{}", LessonId::new()))
        .await;
    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let resp = server()
        .get(&format!("/courses/{}/entitlement", CourseId::new()))
        .add_header(header::AUTHORIZATION, mentor().bearer("some-other-secret"))
        .await;
    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_malformed_id_in_path() {
    let resp = server()
        .get("/courses/not-a-uuid/entitlement")
        .add_header(header::AUTHORIZATION, mentor().bearer(TEST_JWT_SECRET))
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_malformed_second_id_in_path() {
    let resp = server()
        .delete(&format!("/courses/{}/assistants/nobody", CourseId::new()))
        .add_header(header::AUTHORIZATION, mentor().bearer(TEST_JWT_SECRET))
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_surface_storage_failure_as_internal() {
    let resp = server()
        .get(&format!("/courses/{}/entitlement", CourseId::new()))
        .add_header(header::AUTHORIZATION, mentor().bearer(TEST_JWT_SECRET))
        .await;

    assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.json::<Value>()["kind"], "INTERNAL");
}

#[tokio::test]
async fn should_reject_pending_grade_before_storage() {
    let resp = server()
        .patch(&format!("/homework-submissions/{}", SubmissionId::new()))
        .add_header(header::AUTHORIZATION, mentor().bearer(TEST_JWT_SECRET))
        .json(&json!({ "status": "PENDING" }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_unknown_grade_status() {
    let resp = server()
        .patch(&format!("/homework-submissions/{}", SubmissionId::new()))
        .add_header(header::AUTHORIZATION, mentor().bearer(TEST_JWT_SECRET))
        .json(&json!({ "status": "MAYBE" }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_blank_answer_before_storage() {
    let resp = server()
        .post(&format!("/questions/{}/answer", QuestionId::new()))
        .add_header(header::AUTHORIZATION, mentor().bearer(TEST_JWT_SECRET))
        .json(&json!({ "text": "   " }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_purchase_without_amount() {
    let resp = server()
        .post(&format!("/courses/{}/enrollments", CourseId::new()))
        .add_header(header::AUTHORIZATION, mentor().bearer(TEST_JWT_SECRET))
        .json(&json!({ "user_id": UserId::new(), "kind": "PURCHASED" }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "VALIDATION");
}
