use axum::{
    Json,
    extract::State,
};
use serde::Serialize;

use fixoo_auth_types::identity::Identity;
use fixoo_core::extract::ApiPath;
use fixoo_domain::entitlement::Decision;
use fixoo_domain::id::CourseId;

use crate::domain::types::CourseResource;
use crate::error::CoursesServiceError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct EntitlementResponse {
    pub decision: Decision,
    pub is_owner_of_course: bool,
}

// ── GET /courses/{id}/entitlement ────────────────────────────────────────────

pub async fn get_entitlement(
    State(state): State<AppState>,
    identity: Identity,
    ApiPath(course_id): ApiPath<CourseId>,
) -> Result<Json<EntitlementResponse>, CoursesServiceError> {
    let entitlement = state
        .entitlement()
        .execute(&identity.actor(), CourseResource::Course(course_id))
        .await?;
    Ok(Json(EntitlementResponse {
        decision: entitlement.decision,
        is_owner_of_course: entitlement.decision.is_owner(),
    }))
}
