#![allow(async_fn_in_trait)]

use std::collections::HashSet;

use fixoo_domain::entitlement::{CourseOwnership, StudentGrants};
use fixoo_domain::id::{CourseId, LessonGroupId, LessonId, QuestionId, SubmissionId, UserId};
use fixoo_domain::user::UserRole;

use crate::domain::types::{CourseResource, Enrollment, Exam, Grade, QuestionAnswer};
use crate::error::CoursesServiceError;

/// Parent links of the course graph.
pub trait CourseGraphRepository: Send + Sync {
    async fn find_course(
        &self,
        id: CourseId,
    ) -> Result<Option<CourseOwnership>, CoursesServiceError>;

    /// The resource one link closer to the course, or `None` if `resource`
    /// does not exist. A course has no parent.
    async fn find_parent(
        &self,
        resource: CourseResource,
    ) -> Result<Option<CourseResource>, CoursesServiceError>;
}

/// Purchased and assigned access.
pub trait EnrollmentRepository: Send + Sync {
    async fn student_grants(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<StudentGrants, CoursesServiceError>;

    /// Every user holding an assigned row on the course.
    async fn staff_assignments(
        &self,
        course_id: CourseId,
    ) -> Result<HashSet<UserId>, CoursesServiceError>;

    async fn exists(&self, user_id: UserId, course_id: CourseId)
    -> Result<bool, CoursesServiceError>;

    /// Insert a row. Fails with [`CoursesServiceError::AlreadyEnrolled`] if the
    /// pair already holds one.
    async fn create(&self, enrollment: &Enrollment) -> Result<(), CoursesServiceError>;

    /// Delete an assigned row. Returns `false` if there was none.
    async fn remove_assignment(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, CoursesServiceError>;
}

/// Roles of active accounts.
pub trait UserDirectory: Send + Sync {
    async fn find_role(&self, id: UserId) -> Result<Option<UserRole>, CoursesServiceError>;
}

/// Course content reads and the gated writes. Each write returns `false`
/// when the row is gone.
pub trait ContentRepository: Send + Sync {
    async fn list_exams(&self, group_id: LessonGroupId) -> Result<Vec<Exam>, CoursesServiceError>;

    async fn delete_lesson(&self, id: LessonId) -> Result<bool, CoursesServiceError>;

    async fn grade_submission(
        &self,
        id: SubmissionId,
        grade: &Grade,
    ) -> Result<bool, CoursesServiceError>;

    async fn mark_question_read(
        &self,
        id: QuestionId,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Result<bool, CoursesServiceError>;

    /// Store the answer and mark the question read.
    async fn answer_question(
        &self,
        id: QuestionId,
        answer: &QuestionAnswer,
    ) -> Result<bool, CoursesServiceError>;
}
