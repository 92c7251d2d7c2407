use std::collections::HashSet;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr,
    sea_query::{Expr, Func},
};
use uuid::Uuid;

use fixoo_courses_schema::{
    course_enrollments, courses, exams, homework_submissions, homeworks, lesson_groups, lessons,
    questions, users,
};
use fixoo_domain::entitlement::{CourseOwnership, StudentGrants};
use fixoo_domain::id::{
    CourseId, ExamId, HomeworkId, LessonGroupId, LessonId, QuestionId, SubmissionId, UserId,
};
use fixoo_domain::user::UserRole;

use crate::domain::repository::{
    ContentRepository, CourseGraphRepository, EnrollmentRepository, UserDirectory,
};
use crate::domain::types::{
    CourseResource, Enrollment, EnrollmentKind, Exam, ExamAnswer, Grade, Grant, QuestionAnswer,
};
use crate::error::CoursesServiceError;

// ── Course graph ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseGraphRepository {
    pub db: DatabaseConnection,
}

impl CourseGraphRepository for DbCourseGraphRepository {
    async fn find_course(
        &self,
        id: CourseId,
    ) -> Result<Option<CourseOwnership>, CoursesServiceError> {
        let model = courses::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find course")?;
        Ok(model.map(|m| CourseOwnership {
            id: CourseId(m.id),
            mentor_id: UserId(m.mentor_id),
        }))
    }

    async fn find_parent(
        &self,
        resource: CourseResource,
    ) -> Result<Option<CourseResource>, CoursesServiceError> {
        let db = &self.db;
        let parent = match resource {
            CourseResource::Course(_) => None,
            CourseResource::LessonGroup(id) => lesson_groups::Entity::find_by_id(id.0)
                .one(db)
                .await
                .context("find lesson group")?
                .map(|m| CourseResource::Course(CourseId(m.course_id))),
            CourseResource::Lesson(id) => lessons::Entity::find_by_id(id.0)
                .one(db)
                .await
                .context("find lesson")?
                .map(|m| CourseResource::LessonGroup(LessonGroupId(m.group_id))),
            CourseResource::Homework(id) => homeworks::Entity::find_by_id(id.0)
                .one(db)
                .await
                .context("find homework")?
                .map(|m| CourseResource::Lesson(LessonId(m.lesson_id))),
            CourseResource::HomeworkSubmission(id) => homework_submissions::Entity::find_by_id(id.0)
                .one(db)
                .await
                .context("find homework submission")?
                .map(|m| CourseResource::Homework(HomeworkId(m.homework_id))),
            CourseResource::Exam(id) => exams::Entity::find_by_id(id.0)
                .one(db)
                .await
                .context("find exam")?
                .map(|m| CourseResource::LessonGroup(LessonGroupId(m.lesson_group_id))),
            CourseResource::Question(id) => questions::Entity::find_by_id(id.0)
                .one(db)
                .await
                .context("find question")?
                .map(|m| CourseResource::Course(CourseId(m.course_id))),
        };
        Ok(parent)
    }
}

// ── Enrollments ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEnrollmentRepository {
    pub db: DatabaseConnection,
}

impl EnrollmentRepository for DbEnrollmentRepository {
    async fn student_grants(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<StudentGrants, CoursesServiceError> {
        let kinds = course_enrollments::Entity::find()
            .select_only()
            .column(course_enrollments::Column::Kind)
            .filter(course_enrollments::Column::UserId.eq(user_id.0))
            .filter(course_enrollments::Column::CourseId.eq(course_id.0))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .context("find student enrollment")?;
        let mut grants = StudentGrants::default();
        for kind in kinds {
            match kind.parse::<EnrollmentKind>().context("stored enrollment kind")? {
                EnrollmentKind::Purchased => grants.purchased = true,
                EnrollmentKind::Assigned => grants.assigned = true,
            }
        }
        Ok(grants)
    }

    async fn staff_assignments(
        &self,
        course_id: CourseId,
    ) -> Result<HashSet<UserId>, CoursesServiceError> {
        let ids = course_enrollments::Entity::find()
            .select_only()
            .column(course_enrollments::Column::UserId)
            .filter(course_enrollments::Column::CourseId.eq(course_id.0))
            .filter(course_enrollments::Column::Kind.eq(EnrollmentKind::Assigned.as_str()))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("list course assignments")?;
        Ok(ids.into_iter().map(UserId).collect())
    }

    async fn exists(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, CoursesServiceError> {
        let found = course_enrollments::Entity::find()
            .filter(course_enrollments::Column::UserId.eq(user_id.0))
            .filter(course_enrollments::Column::CourseId.eq(course_id.0))
            .one(&self.db)
            .await
            .context("find enrollment")?;
        Ok(found.is_some())
    }

    async fn create(&self, enrollment: &Enrollment) -> Result<(), CoursesServiceError> {
        let (amount, paid_via) = match &enrollment.grant {
            Grant::Purchased { amount, paid_via } => (Some(*amount), paid_via.clone()),
            Grant::Assigned => (None, None),
        };
        let result = course_enrollments::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(enrollment.user_id.0),
            course_id: Set(enrollment.course_id.0),
            kind: Set(enrollment.grant.kind().as_str().to_owned()),
            amount: Set(amount),
            paid_via: Set(paid_via),
            created_at: Set(enrollment.created_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(CoursesServiceError::AlreadyEnrolled)
                }
                _ => Err(anyhow::Error::new(e).context("insert enrollment").into()),
            },
        }
    }

    async fn remove_assignment(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, CoursesServiceError> {
        let result = course_enrollments::Entity::delete_many()
            .filter(course_enrollments::Column::UserId.eq(user_id.0))
            .filter(course_enrollments::Column::CourseId.eq(course_id.0))
            .filter(course_enrollments::Column::Kind.eq(EnrollmentKind::Assigned.as_str()))
            .exec(&self.db)
            .await
            .context("delete assignment")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserDirectory {
    pub db: DatabaseConnection,
}

impl UserDirectory for DbUserDirectory {
    async fn find_role(&self, id: UserId) -> Result<Option<UserRole>, CoursesServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .filter(users::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find user role")?;
        match model {
            Some(m) => {
                let role = m
                    .role
                    .parse::<UserRole>()
                    .with_context(|| format!("stored role of user {}", m.id))?;
                Ok(Some(role))
            }
            None => Ok(None),
        }
    }
}

// ── Content ──────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbContentRepository {
    pub db: DatabaseConnection,
}

fn exam_from_model(model: exams::Model) -> Result<Exam, CoursesServiceError> {
    let answer = model
        .answer
        .parse::<ExamAnswer>()
        .with_context(|| format!("stored answer of exam {}", model.id))?;
    Ok(Exam {
        id: ExamId(model.id),
        lesson_group_id: LessonGroupId(model.lesson_group_id),
        question: model.question,
        variant_a: model.variant_a,
        variant_b: model.variant_b,
        variant_c: model.variant_c,
        variant_d: model.variant_d,
        answer,
    })
}

impl ContentRepository for DbContentRepository {
    async fn list_exams(&self, group_id: LessonGroupId) -> Result<Vec<Exam>, CoursesServiceError> {
        exams::Entity::find()
            .filter(exams::Column::LessonGroupId.eq(group_id.0))
            .order_by_asc(exams::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list exams")?
            .into_iter()
            .map(exam_from_model)
            .collect()
    }

    async fn delete_lesson(&self, id: LessonId) -> Result<bool, CoursesServiceError> {
        let result = lessons::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete lesson")?;
        Ok(result.rows_affected > 0)
    }

    async fn grade_submission(
        &self,
        id: SubmissionId,
        grade: &Grade,
    ) -> Result<bool, CoursesServiceError> {
        let result = homework_submissions::Entity::update_many()
            .col_expr(
                homework_submissions::Column::Status,
                Expr::value(grade.status.as_str()),
            )
            .col_expr(
                homework_submissions::Column::Reason,
                Expr::value(grade.reason.clone()),
            )
            .col_expr(
                homework_submissions::Column::CheckedBy,
                Expr::value(grade.checked_by.0),
            )
            .col_expr(
                homework_submissions::Column::CheckedAt,
                Expr::value(grade.checked_at),
            )
            .filter(homework_submissions::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("grade submission")?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_question_read(
        &self,
        id: QuestionId,
        at: DateTime<Utc>,
    ) -> Result<bool, CoursesServiceError> {
        // Keeps the first read time.
        let result = questions::Entity::update_many()
            .col_expr(questions::Column::Read, Expr::value(true))
            .col_expr(
                questions::Column::ReadAt,
                Func::coalesce([Expr::col(questions::Column::ReadAt).into(), Expr::value(at)])
                    .into(),
            )
            .filter(questions::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("mark question read")?;
        Ok(result.rows_affected > 0)
    }

    async fn answer_question(
        &self,
        id: QuestionId,
        answer: &QuestionAnswer,
    ) -> Result<bool, CoursesServiceError> {
        let result = questions::Entity::update_many()
            .col_expr(questions::Column::Answer, Expr::value(answer.text.clone()))
            .col_expr(questions::Column::AnsweredBy, Expr::value(answer.answered_by.0))
            .col_expr(questions::Column::AnsweredAt, Expr::value(answer.answered_at))
            .col_expr(questions::Column::Read, Expr::value(true))
            .col_expr(
                questions::Column::ReadAt,
                Func::coalesce([
                    Expr::col(questions::Column::ReadAt).into(),
                    Expr::value(answer.answered_at),
                ])
                .into(),
            )
            .filter(questions::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("answer question")?;
        Ok(result.rows_affected > 0)
    }
}
