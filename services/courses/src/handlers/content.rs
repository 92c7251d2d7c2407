use axum::{
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;

use fixoo_auth_types::identity::Identity;
use fixoo_core::extract::{ApiJson, ApiPath};
use fixoo_domain::id::{LessonId, QuestionId, SubmissionId};

use crate::domain::types::SubmissionStatus;
use crate::error::CoursesServiceError;
use crate::state::AppState;
use crate::usecase::content::{
    AnswerQuestionUseCase, DeleteLessonUseCase, GradeSubmissionInput, GradeSubmissionUseCase,
    MarkQuestionReadUseCase,
};

// ── DELETE /lessons/{id} ─────────────────────────────────────────────────────

pub async fn delete_lesson(
    State(state): State<AppState>,
    identity: Identity,
    ApiPath(lesson_id): ApiPath<LessonId>,
) -> Result<StatusCode, CoursesServiceError> {
    let usecase = DeleteLessonUseCase {
        entitlement: state.entitlement(),
        content: state.content_repo(),
    };
    usecase.execute(&identity.actor(), lesson_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /homework-submissions/{id} ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct GradeSubmissionRequest {
    pub status: SubmissionStatus,
    pub reason: Option<String>,
}

pub async fn grade_submission(
    State(state): State<AppState>,
    identity: Identity,
    ApiPath(submission_id): ApiPath<SubmissionId>,
    ApiJson(body): ApiJson<GradeSubmissionRequest>,
) -> Result<StatusCode, CoursesServiceError> {
    let usecase = GradeSubmissionUseCase {
        entitlement: state.entitlement(),
        content: state.content_repo(),
    };
    usecase
        .execute(
            &identity.actor(),
            GradeSubmissionInput {
                submission_id,
                status: body.status,
                reason: body.reason,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /questions/{id}/read ───────────────────────────────────────────────

pub async fn mark_question_read(
    State(state): State<AppState>,
    identity: Identity,
    ApiPath(question_id): ApiPath<QuestionId>,
) -> Result<StatusCode, CoursesServiceError> {
    let usecase = MarkQuestionReadUseCase {
        entitlement: state.entitlement(),
        content: state.content_repo(),
    };
    usecase.execute(&identity.actor(), question_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /questions/{id}/answer ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AnswerQuestionRequest {
    pub text: String,
}

pub async fn answer_question(
    State(state): State<AppState>,
    identity: Identity,
    ApiPath(question_id): ApiPath<QuestionId>,
    ApiJson(body): ApiJson<AnswerQuestionRequest>,
) -> Result<StatusCode, CoursesServiceError> {
    let usecase = AnswerQuestionUseCase {
        entitlement: state.entitlement(),
        content: state.content_repo(),
    };
    usecase
        .execute(&identity.actor(), question_id, &body.text)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
