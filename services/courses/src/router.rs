use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post},
};

use fixoo_core::health::{database_ready, healthz};
use fixoo_core::middleware::with_http_layers;

use crate::handlers::{
    content::{answer_question, delete_lesson, grade_submission, mark_question_read},
    enrollment::{assign_assistant, grant_enrollment, unassign_assistant},
    entitlement::get_entitlement,
    exam::list_group_exams,
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Courses
        .route("/courses/{id}/entitlement", get(get_entitlement))
        .route("/courses/{id}/enrollments", post(grant_enrollment))
        .route("/courses/{id}/assistants", post(assign_assistant))
        .route(
            "/courses/{id}/assistants/{user_id}",
            delete(unassign_assistant),
        )
        // Content
        .route("/lesson-groups/{id}/exams", get(list_group_exams))
        .route("/lessons/{id}", delete(delete_lesson))
        .route("/homework-submissions/{id}", patch(grade_submission))
        .route("/questions/{id}/read", patch(mark_question_read))
        .route("/questions/{id}/answer", post(answer_question))
        .with_state(state);
    with_http_layers(router)
}
