use axum::{
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;

use fixoo_auth_types::identity::Identity;
use fixoo_core::extract::{ApiJson, ApiPath};
use fixoo_domain::id::{CourseId, UserId};

use crate::domain::types::EnrollmentKind;
use crate::error::CoursesServiceError;
use crate::state::AppState;
use crate::usecase::enrollment::{
    AssignAssistantUseCase, GrantEnrollmentInput, GrantEnrollmentUseCase, UnassignAssistantUseCase,
};

// ── POST /courses/{id}/enrollments ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct GrantEnrollmentRequest {
    pub user_id: UserId,
    pub kind: EnrollmentKind,
    pub amount: Option<i64>,
    pub paid_via: Option<String>,
}

pub async fn grant_enrollment(
    State(state): State<AppState>,
    identity: Identity,
    ApiPath(course_id): ApiPath<CourseId>,
    ApiJson(body): ApiJson<GrantEnrollmentRequest>,
) -> Result<StatusCode, CoursesServiceError> {
    let usecase = GrantEnrollmentUseCase {
        entitlement: state.entitlement(),
        users: state.user_directory(),
    };
    usecase
        .execute(
            &identity.actor(),
            GrantEnrollmentInput {
                course_id,
                user_id: body.user_id,
                kind: body.kind,
                amount: body.amount,
                paid_via: body.paid_via,
            },
        )
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /courses/{id}/assistants ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AssignAssistantRequest {
    pub user_id: UserId,
}

pub async fn assign_assistant(
    State(state): State<AppState>,
    identity: Identity,
    ApiPath(course_id): ApiPath<CourseId>,
    ApiJson(body): ApiJson<AssignAssistantRequest>,
) -> Result<StatusCode, CoursesServiceError> {
    let usecase = AssignAssistantUseCase {
        entitlement: state.entitlement(),
        users: state.user_directory(),
    };
    usecase
        .execute(&identity.actor(), course_id, body.user_id)
        .await?;
    Ok(StatusCode::CREATED)
}

// ── DELETE /courses/{id}/assistants/{user_id} ────────────────────────────────

pub async fn unassign_assistant(
    State(state): State<AppState>,
    identity: Identity,
    ApiPath((course_id, assistant_id)): ApiPath<(CourseId, UserId)>,
) -> Result<StatusCode, CoursesServiceError> {
    let usecase = UnassignAssistantUseCase {
        entitlement: state.entitlement(),
    };
    usecase
        .execute(&identity.actor(), course_id, assistant_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
