use axum::{
    Json,
    extract::State,
};
use serde::Serialize;

use fixoo_auth_types::identity::Identity;
use fixoo_core::extract::ApiPath;
use fixoo_domain::id::LessonGroupId;

use crate::domain::types::ExamSheet;
use crate::error::CoursesServiceError;
use crate::state::AppState;
use crate::usecase::exam::ListGroupExamsUseCase;

#[derive(Serialize)]
pub struct ExamsResponse {
    pub exams: ExamSheet,
}

// ── GET /lesson-groups/{id}/exams ────────────────────────────────────────────

pub async fn list_group_exams(
    State(state): State<AppState>,
    identity: Identity,
    ApiPath(group_id): ApiPath<LessonGroupId>,
) -> Result<Json<ExamsResponse>, CoursesServiceError> {
    let usecase = ListGroupExamsUseCase {
        entitlement: state.entitlement(),
        content: state.content_repo(),
    };
    let exams = usecase.execute(&identity.actor(), group_id).await?;
    Ok(Json(ExamsResponse { exams }))
}
