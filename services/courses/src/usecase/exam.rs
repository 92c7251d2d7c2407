use fixoo_domain::entitlement::Actor;
use fixoo_domain::id::LessonGroupId;

use crate::domain::repository::{ContentRepository, CourseGraphRepository, EnrollmentRepository};
use crate::domain::types::{CourseResource, ExamSheet};
use crate::error::CoursesServiceError;
use crate::usecase::entitlement::ResolveEntitlementUseCase;

pub struct ListGroupExamsUseCase<G, E, C>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    C: ContentRepository,
{
    pub entitlement: ResolveEntitlementUseCase<G, E>,
    pub content: C,
}

impl<G, E, C> ListGroupExamsUseCase<G, E, C>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    C: ContentRepository,
{
    /// Owners and staff viewers get the answer key; students get questions only.
    pub async fn execute(
        &self,
        actor: &Actor,
        group_id: LessonGroupId,
    ) -> Result<ExamSheet, CoursesServiceError> {
        let entitlement = self
            .entitlement
            .require_view(actor, CourseResource::LessonGroup(group_id))
            .await?;
        let exams = self.content.list_exams(group_id).await?;

        if entitlement.decision.is_owner() || actor.role.is_staff() {
            Ok(ExamSheet::WithAnswers(exams))
        } else {
            Ok(ExamSheet::Questions(exams.into_iter().map(Into::into).collect()))
        }
    }
}
