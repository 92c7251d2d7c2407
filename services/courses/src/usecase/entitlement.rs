use std::collections::HashSet;

use tracing::debug;

use fixoo_domain::entitlement::{
    Actor, CourseAction, CourseOwnership, Decision, StudentGrants, resolve,
};
use fixoo_domain::user::UserRole;

use crate::domain::repository::{CourseGraphRepository, EnrollmentRepository};
use crate::domain::types::CourseResource;
use crate::error::CoursesServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entitlement {
    pub course: CourseOwnership,
    pub decision: Decision,
}

/// Resolves what an actor may do on a course resource.
///
/// Every gated use case goes through here: the resource is walked up to its
/// course, the facts the actor's role needs are loaded, and the pure resolver
/// decides.
pub struct ResolveEntitlementUseCase<G: CourseGraphRepository, E: EnrollmentRepository> {
    pub graph: G,
    pub enrollments: E,
}

impl<G: CourseGraphRepository, E: EnrollmentRepository> ResolveEntitlementUseCase<G, E> {
    /// Course that `resource` belongs to. A broken link anywhere on the way up
    /// is `NotFound` for the resource that was asked for.
    pub async fn locate(
        &self,
        resource: CourseResource,
    ) -> Result<CourseOwnership, CoursesServiceError> {
        let not_found = || CoursesServiceError::NotFound(resource.name());
        let mut current = resource;
        loop {
            match current {
                CourseResource::Course(id) => {
                    return self.graph.find_course(id).await?.ok_or_else(not_found);
                }
                other => {
                    current = match self.graph.find_parent(other).await? {
                        Some(parent) => parent,
                        None => return Err(not_found()),
                    };
                }
            }
        }
    }

    pub async fn execute(
        &self,
        actor: &Actor,
        resource: CourseResource,
    ) -> Result<Entitlement, CoursesServiceError> {
        let course = self.locate(resource).await?;

        // Only the facts the actor's role is judged by.
        let (staff, grants) = match actor.role {
            UserRole::Assistant => (
                self.enrollments.staff_assignments(course.id).await?,
                StudentGrants::default(),
            ),
            UserRole::Student => (
                HashSet::new(),
                self.enrollments.student_grants(actor.id, course.id).await?,
            ),
            UserRole::Admin | UserRole::Mentor => (HashSet::new(), StudentGrants::default()),
        };

        let decision = resolve(actor, &course, &staff, grants);
        debug!(
            user_id = %actor.id,
            role = %actor.role,
            course_id = %course.id,
            ?decision,
            "entitlement resolved"
        );
        Ok(Entitlement { course, decision })
    }

    /// Like [`execute`](Self::execute) but fails with `Forbidden` on `Deny`.
    pub async fn require_view(
        &self,
        actor: &Actor,
        resource: CourseResource,
    ) -> Result<Entitlement, CoursesServiceError> {
        let entitlement = self.execute(actor, resource).await?;
        if !entitlement.decision.allows_view() {
            return Err(CoursesServiceError::Forbidden);
        }
        Ok(entitlement)
    }

    /// Fails with `Forbidden` unless the decision permits `action`. Staff
    /// actions additionally need a staff role, so a student's view never
    /// grades or answers.
    pub async fn authorize(
        &self,
        actor: &Actor,
        resource: CourseResource,
        action: CourseAction,
    ) -> Result<Entitlement, CoursesServiceError> {
        let entitlement = self.execute(actor, resource).await?;
        let staff_ok = !action.is_staff_action() || actor.role.is_staff();
        if !(entitlement.decision.permits(action) && staff_ok) {
            return Err(CoursesServiceError::Forbidden);
        }
        Ok(entitlement)
    }
}
