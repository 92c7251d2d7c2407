//! Course entitlement resolution.
//!
//! [`resolve`] is the single place that decides whether an actor may see or
//! change a course. It is a pure function of the actor's role and the
//! ownership/enrollment facts the caller loaded for one course; callers that
//! hold a nested resource (lesson, homework, exam, ...) must first walk it up
//! to its course and pass that course here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::id::{CourseId, UserId};
use crate::user::UserRole;

/// The authenticated user asking for access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: UserRole,
}

/// Ownership facts of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseOwnership {
    pub id: CourseId,
    pub mentor_id: UserId,
}

/// Enrollment facts of one student on one course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudentGrants {
    pub purchased: bool,
    pub assigned: bool,
}

impl StudentGrants {
    pub fn any(self) -> bool {
        self.purchased || self.assigned
    }
}

/// Outcome of entitlement resolution.
///
/// `Deny` is a regular value, not an error. A missing course is reported by the
/// caller's lookup, never as `Deny`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Deny,
    View,
    Owner,
}

/// Mutations on a course or its nested resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseAction {
    EditCourse,
    ManageLessonGroups,
    ManageLessons,
    ManageHomework,
    ManageExams,
    ManageEnrollments,
    ManageStaff,
    GradeSubmission,
    MarkQuestionRead,
    AnswerQuestion,
}

impl CourseAction {
    /// Actions a viewer on staff duty may perform without owning the course.
    pub fn is_staff_action(self) -> bool {
        matches!(
            self,
            Self::GradeSubmission | Self::MarkQuestionRead | Self::AnswerQuestion
        )
    }
}

impl Decision {
    pub fn allows_view(self) -> bool {
        !matches!(self, Self::Deny)
    }

    pub fn is_owner(self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Write gate: owners may do everything, viewers only the staff actions.
    pub fn permits(self, action: CourseAction) -> bool {
        match self {
            Self::Owner => true,
            Self::View => action.is_staff_action(),
            Self::Deny => false,
        }
    }
}

/// Decide what `actor` may do on `course`.
///
/// Evaluated by role, first match wins:
///
/// | Role | Result |
/// |------|--------|
/// | `Admin` | always `Owner` |
/// | `Mentor` | `Owner` if they are the course mentor, else `Deny` |
/// | `Assistant` | `View` if listed in `staff_assignments`, else `Deny` |
/// | `Student` | `View` if purchased or assigned, else `Deny` |
///
/// Facts irrelevant to the actor's role are ignored, so callers may pass empty
/// values for them.
pub fn resolve(
    actor: &Actor,
    course: &CourseOwnership,
    staff_assignments: &HashSet<UserId>,
    grants: StudentGrants,
) -> Decision {
    match actor.role {
        UserRole::Admin => Decision::Owner,
        UserRole::Mentor if actor.id == course.mentor_id => Decision::Owner,
        UserRole::Mentor => Decision::Deny,
        UserRole::Assistant if staff_assignments.contains(&actor.id) => Decision::View,
        UserRole::Assistant => Decision::Deny,
        UserRole::Student if grants.any() => Decision::View,
        UserRole::Student => Decision::Deny,
    }
}
