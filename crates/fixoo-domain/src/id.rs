//! Newtype wrappers for domain identifiers.
//!
//! Every identifier is a UUID on the wire and in storage. Distinct types keep a
//! lesson id from being passed where a course id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id!(
    /// Identifies a user account (any role).
    UserId
);
uuid_id!(
    /// Identifies a course.
    CourseId
);
uuid_id!(
    /// Identifies a lesson group (a section of a course).
    LessonGroupId
);
uuid_id!(
    /// Identifies a lesson inside a lesson group.
    LessonId
);
uuid_id!(
    /// Identifies the homework attached to a lesson.
    HomeworkId
);
uuid_id!(
    /// Identifies a student's homework submission.
    SubmissionId
);
uuid_id!(
    /// Identifies a multiple-choice exam item of a lesson group.
    ExamId
);
uuid_id!(
    /// Identifies a student question asked on a course.
    QuestionId
);
uuid_id!(
    /// Identifies a one-time verification code row.
    OtpId
);
