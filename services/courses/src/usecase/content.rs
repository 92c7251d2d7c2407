use chrono::Utc;
use tracing::info;

use fixoo_domain::entitlement::{Actor, CourseAction};
use fixoo_domain::id::{LessonId, QuestionId, SubmissionId};

use crate::domain::repository::{ContentRepository, CourseGraphRepository, EnrollmentRepository};
use crate::domain::types::{CourseResource, Grade, QuestionAnswer, SubmissionStatus};
use crate::error::CoursesServiceError;
use crate::usecase::entitlement::ResolveEntitlementUseCase;

/// A gated write found the row gone after authorization passed.
fn gone(resource: CourseResource) -> CoursesServiceError {
    CoursesServiceError::NotFound(resource.name())
}

// ── DeleteLesson ─────────────────────────────────────────────────────────────

pub struct DeleteLessonUseCase<G, E, C>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    C: ContentRepository,
{
    pub entitlement: ResolveEntitlementUseCase<G, E>,
    pub content: C,
}

impl<G, E, C> DeleteLessonUseCase<G, E, C>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    C: ContentRepository,
{
    pub async fn execute(&self, actor: &Actor, lesson_id: LessonId) -> Result<(), CoursesServiceError> {
        let resource = CourseResource::Lesson(lesson_id);
        self.entitlement
            .authorize(actor, resource, CourseAction::ManageLessons)
            .await?;
        if !self.content.delete_lesson(lesson_id).await? {
            return Err(gone(resource));
        }
        info!(%lesson_id, user_id = %actor.id, "lesson deleted");
        Ok(())
    }
}

// ── GradeSubmission ──────────────────────────────────────────────────────────

pub struct GradeSubmissionInput {
    pub submission_id: SubmissionId,
    pub status: SubmissionStatus,
    pub reason: Option<String>,
}

pub struct GradeSubmissionUseCase<G, E, C>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    C: ContentRepository,
{
    pub entitlement: ResolveEntitlementUseCase<G, E>,
    pub content: C,
}

impl<G, E, C> GradeSubmissionUseCase<G, E, C>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    C: ContentRepository,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        input: GradeSubmissionInput,
    ) -> Result<(), CoursesServiceError> {
        if input.status == SubmissionStatus::Pending {
            return Err(CoursesServiceError::Validation(
                "status must be APPROVED or REJECTED".to_owned(),
            ));
        }
        let resource = CourseResource::HomeworkSubmission(input.submission_id);
        self.entitlement
            .authorize(actor, resource, CourseAction::GradeSubmission)
            .await?;

        let grade = Grade {
            status: input.status,
            reason: input
                .reason
                .map(|r| r.trim().to_owned())
                .filter(|r| !r.is_empty()),
            checked_by: actor.id,
            checked_at: Utc::now(),
        };
        if !self.content.grade_submission(input.submission_id, &grade).await? {
            return Err(gone(resource));
        }
        info!(
            submission_id = %input.submission_id,
            status = grade.status.as_str(),
            checked_by = %actor.id,
            "submission graded"
        );
        Ok(())
    }
}

// ── MarkQuestionRead ─────────────────────────────────────────────────────────

pub struct MarkQuestionReadUseCase<G, E, C>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    C: ContentRepository,
{
    pub entitlement: ResolveEntitlementUseCase<G, E>,
    pub content: C,
}

impl<G, E, C> MarkQuestionReadUseCase<G, E, C>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    C: ContentRepository,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        question_id: QuestionId,
    ) -> Result<(), CoursesServiceError> {
        let resource = CourseResource::Question(question_id);
        self.entitlement
            .authorize(actor, resource, CourseAction::MarkQuestionRead)
            .await?;
        if !self.content.mark_question_read(question_id, Utc::now()).await? {
            return Err(gone(resource));
        }
        Ok(())
    }
}

// ── AnswerQuestion ───────────────────────────────────────────────────────────

pub struct AnswerQuestionUseCase<G, E, C>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    C: ContentRepository,
{
    pub entitlement: ResolveEntitlementUseCase<G, E>,
    pub content: C,
}

impl<G, E, C> AnswerQuestionUseCase<G, E, C>
where
    G: CourseGraphRepository,
    E: EnrollmentRepository,
    C: ContentRepository,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        question_id: QuestionId,
        text: &str,
    ) -> Result<(), CoursesServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoursesServiceError::Validation("answer text is required".to_owned()));
        }
        let resource = CourseResource::Question(question_id);
        self.entitlement
            .authorize(actor, resource, CourseAction::AnswerQuestion)
            .await?;

        let answer = QuestionAnswer {
            text: text.to_owned(),
            answered_by: actor.id,
            answered_at: Utc::now(),
        };
        if !self.content.answer_question(question_id, &answer).await? {
            return Err(gone(resource));
        }
        info!(%question_id, answered_by = %actor.id, "question answered");
        Ok(())
    }
}
