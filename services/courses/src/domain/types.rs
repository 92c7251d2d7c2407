use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fixoo_domain::id::{
    CourseId, ExamId, HomeworkId, LessonGroupId, LessonId, QuestionId, SubmissionId, UserId,
};

/// Anything whose access is decided by the course it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseResource {
    Course(CourseId),
    LessonGroup(LessonGroupId),
    Lesson(LessonId),
    Homework(HomeworkId),
    HomeworkSubmission(SubmissionId),
    Exam(ExamId),
    Question(QuestionId),
}

impl CourseResource {
    pub fn name(self) -> &'static str {
        match self {
            Self::Course(_) => "course",
            Self::LessonGroup(_) => "lesson group",
            Self::Lesson(_) => "lesson",
            Self::Homework(_) => "homework",
            Self::HomeworkSubmission(_) => "homework submission",
            Self::Exam(_) => "exam",
            Self::Question(_) => "question",
        }
    }
}

// ── Exams ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamAnswer {
    A,
    B,
    C,
    D,
}

impl ExamAnswer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown exam answer: {0:?}")]
pub struct UnknownAnswer(pub String);

impl FromStr for ExamAnswer {
    type Err = UnknownAnswer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            other => Err(UnknownAnswer(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exam {
    pub id: ExamId,
    pub lesson_group_id: LessonGroupId,
    pub question: String,
    pub variant_a: String,
    pub variant_b: String,
    pub variant_c: String,
    pub variant_d: String,
    pub answer: ExamAnswer,
}

/// An exam as students see it. There is no answer field to leak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamQuestion {
    pub id: ExamId,
    pub lesson_group_id: LessonGroupId,
    pub question: String,
    pub variant_a: String,
    pub variant_b: String,
    pub variant_c: String,
    pub variant_d: String,
}

impl From<Exam> for ExamQuestion {
    fn from(exam: Exam) -> Self {
        Self {
            id: exam.id,
            lesson_group_id: exam.lesson_group_id,
            question: exam.question,
            variant_a: exam.variant_a,
            variant_b: exam.variant_b,
            variant_c: exam.variant_c,
            variant_d: exam.variant_d,
        }
    }
}

/// Exams of one lesson group, shaped for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExamSheet {
    WithAnswers(Vec<Exam>),
    Questions(Vec<ExamQuestion>),
}

// ── Homework ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

/// Verdict written by a grader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub status: SubmissionStatus,
    pub reason: Option<String>,
    pub checked_by: UserId,
    pub checked_at: DateTime<Utc>,
}

/// Staff answer to a student question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAnswer {
    pub text: String,
    pub answered_by: UserId,
    pub answered_at: DateTime<Utc>,
}

// ── Enrollment ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentKind {
    Purchased,
    Assigned,
}

impl EnrollmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchased => "PURCHASED",
            Self::Assigned => "ASSIGNED",
        }
    }
}

impl fmt::Display for EnrollmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown enrollment kind: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for EnrollmentKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PURCHASED" => Ok(Self::Purchased),
            "ASSIGNED" => Ok(Self::Assigned),
            other => Err(UnknownKind(other.to_owned())),
        }
    }
}

/// How a user got access to a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    Purchased {
        amount: i64,
        paid_via: Option<String>,
    },
    /// Granted access for a student, delegated staff access for an assistant.
    Assigned,
}

impl Grant {
    pub fn kind(&self) -> EnrollmentKind {
        match self {
            Self::Purchased { .. } => EnrollmentKind::Purchased,
            Self::Assigned => EnrollmentKind::Assigned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub grant: Grant,
    pub created_at: DateTime<Utc>,
}
