use chrono::Utc;
use tracing::info;

use fixoo_domain::entitlement::{Actor, CourseAction};
use fixoo_domain::id::{CourseId, UserId};
use fixoo_domain::user::UserRole;

use crate::domain::repository::{CourseGraphRepository, EnrollmentRepository, UserDirectory};
use crate::domain::types::{CourseResource, Enrollment, EnrollmentKind, Grant};
use crate::error::CoursesServiceError;
use crate::usecase::entitlement::ResolveEntitlementUseCase;

/// Target user must exist and hold `expected`.
async fn require_role<U: UserDirectory>(
    users: &U,
    user_id: UserId,
    expected: UserRole,
) -> Result<(), CoursesServiceError> {
    match users.find_role(user_id).await? {
        None => Err(CoursesServiceError::NotFound("user")),
        Some(role) if role == expected => Ok(()),
        Some(_) => Err(CoursesServiceError::InvalidRole {
            expected: expected.as_str(),
        }),
    }
}

/// Pre-check plus insert. The unique index still catches a concurrent insert
/// and the repository reports it the same way.
async fn insert_enrollment<E: EnrollmentRepository>(
    enrollments: &E,
    enrollment: &Enrollment,
) -> Result<(), CoursesServiceError> {
    if enrollments
        .exists(enrollment.user_id, enrollment.course_id)
        .await?
    {
        return Err(CoursesServiceError::AlreadyEnrolled);
    }
    enrollments.create(enrollment).await
}

// ── GrantEnrollment ──────────────────────────────────────────────────────────

pub struct GrantEnrollmentInput {
    pub course_id: CourseId,
    pub user_id: UserId,
    pub kind: EnrollmentKind,
    pub amount: Option<i64>,
    pub paid_via: Option<String>,
}

pub struct GrantEnrollmentUseCase<G, E, U>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    U: UserDirectory,
{
    pub entitlement: ResolveEntitlementUseCase<G, E>,
    pub users: U,
}

impl<G, E, U> GrantEnrollmentUseCase<G, E, U>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    U: UserDirectory,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        input: GrantEnrollmentInput,
    ) -> Result<(), CoursesServiceError> {
        let grant = match input.kind {
            EnrollmentKind::Purchased => {
                let amount = input.amount.ok_or_else(|| {
                    CoursesServiceError::Validation("amount is required for a purchase".to_owned())
                })?;
                if amount < 0 {
                    return Err(CoursesServiceError::Validation(
                        "amount must not be negative".to_owned(),
                    ));
                }
                Grant::Purchased {
                    amount,
                    paid_via: input.paid_via,
                }
            }
            EnrollmentKind::Assigned => Grant::Assigned,
        };

        self.entitlement
            .authorize(
                actor,
                CourseResource::Course(input.course_id),
                CourseAction::ManageEnrollments,
            )
            .await?;
        require_role(&self.users, input.user_id, UserRole::Student).await?;

        let enrollment = Enrollment {
            user_id: input.user_id,
            course_id: input.course_id,
            grant,
            created_at: Utc::now(),
        };
        insert_enrollment(&self.entitlement.enrollments, &enrollment).await?;
        info!(
            course_id = %input.course_id,
            user_id = %input.user_id,
            kind = %input.kind,
            granted_by = %actor.id,
            "enrollment granted"
        );
        Ok(())
    }
}

// ── AssignAssistant ──────────────────────────────────────────────────────────

pub struct AssignAssistantUseCase<G, E, U>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    U: UserDirectory,
{
    pub entitlement: ResolveEntitlementUseCase<G, E>,
    pub users: U,
}

impl<G, E, U> AssignAssistantUseCase<G, E, U>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    U: UserDirectory,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        course_id: CourseId,
        assistant_id: UserId,
    ) -> Result<(), CoursesServiceError> {
        self.entitlement
            .authorize(actor, CourseResource::Course(course_id), CourseAction::ManageStaff)
            .await?;
        require_role(&self.users, assistant_id, UserRole::Assistant).await?;

        let enrollment = Enrollment {
            user_id: assistant_id,
            course_id,
            grant: Grant::Assigned,
            created_at: Utc::now(),
        };
        insert_enrollment(&self.entitlement.enrollments, &enrollment).await?;
        info!(%course_id, %assistant_id, assigned_by = %actor.id, "assistant assigned");
        Ok(())
    }
}

// ── UnassignAssistant ────────────────────────────────────────────────────────

pub struct UnassignAssistantUseCase<G, E>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
{
    pub entitlement: ResolveEntitlementUseCase<G, E>,
}

impl<G, E> UnassignAssistantUseCase<G, E>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        course_id: CourseId,
        assistant_id: UserId,
    ) -> Result<(), CoursesServiceError> {
        self.entitlement
            .authorize(actor, CourseResource::Course(course_id), CourseAction::ManageStaff)
            .await?;
        if !self
            .entitlement
            .enrollments
            .remove_assignment(assistant_id, course_id)
            .await?
        {
            return Err(CoursesServiceError::NotFound("assignment"));
        }
        info!(%course_id, %assistant_id, removed_by = %actor.id, "assistant unassigned");
        Ok(())
    }
}
