use fixoo_courses::domain::types::{CourseResource, Grant, SubmissionStatus};
use fixoo_courses::error::CoursesServiceError;
use fixoo_courses::usecase::content::{
    AnswerQuestionUseCase, DeleteLessonUseCase, GradeSubmissionInput, GradeSubmissionUseCase,
    MarkQuestionReadUseCase,
};
use fixoo_domain::entitlement::Actor;
use fixoo_domain::id::{LessonId, SubmissionId};
use fixoo_domain::user::UserRole;

use crate::helpers::{Fixture, MockCourses, actor};

fn assigned_assistant(store: &MockCourses, f: &Fixture) -> Actor {
    let id = store.add_user(UserRole::Assistant);
    store.enroll(id, f.course_id, Grant::Assigned);
    actor(id, UserRole::Assistant)
}

fn grade_usecase(store: &MockCourses) -> GradeSubmissionUseCase<MockCourses, MockCourses, MockCourses> {
    GradeSubmissionUseCase {
        entitlement: store.entitlement(),
        content: store.clone(),
    }
}

fn grade_input(id: SubmissionId, status: SubmissionStatus, reason: Option<&str>) -> GradeSubmissionInput {
    GradeSubmissionInput {
        submission_id: id,
        status,
        reason: reason.map(str::to_owned),
    }
}

// ── DeleteLessonUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_let_owner_delete_lesson() {
    let (store, f) = MockCourses::seeded();
    let usecase = DeleteLessonUseCase {
        entitlement: store.entitlement(),
        content: store.clone(),
    };

    usecase
        .execute(&actor(f.mentor_id, UserRole::Mentor), f.lesson_id)
        .await
        .unwrap();

    let err = store
        .entitlement()
        .execute(&actor(f.mentor_id, UserRole::Mentor), CourseResource::Lesson(f.lesson_id))
        .await
        .unwrap_err();
    assert!(matches!(err, CoursesServiceError::NotFound("lesson")));
}

#[tokio::test]
async fn should_not_let_assistant_delete_lesson() {
    let (store, f) = MockCourses::seeded();
    let assistant = assigned_assistant(&store, &f);
    let usecase = DeleteLessonUseCase {
        entitlement: store.entitlement(),
        content: store.clone(),
    };

    let err = usecase.execute(&assistant, f.lesson_id).await.unwrap_err();

    assert!(matches!(err, CoursesServiceError::Forbidden));
    assert!(store.data.lock().unwrap().parents.contains_key(&CourseResource::Lesson(f.lesson_id)));
}

#[tokio::test]
async fn should_report_unknown_lesson_on_delete() {
    let (store, _) = MockCourses::seeded();
    let usecase = DeleteLessonUseCase {
        entitlement: store.entitlement(),
        content: store.clone(),
    };

    let err = usecase
        .execute(&actor(fixoo_domain::id::UserId::new(), UserRole::Admin), LessonId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CoursesServiceError::NotFound("lesson")));
}

// ── GradeSubmissionUseCase ───────────────────────────────────────────────────

#[tokio::test]
async fn should_record_grader_and_status() {
    let (store, f) = MockCourses::seeded();
    let assistant = assigned_assistant(&store, &f);

    grade_usecase(&store)
        .execute(
            &assistant,
            grade_input(f.submission_id, SubmissionStatus::Rejected, Some("  missing task 2 ")),
        )
        .await
        .unwrap();

    let grade = store.grade(f.submission_id).unwrap();
    assert_eq!(grade.status, SubmissionStatus::Rejected);
    assert_eq!(grade.reason.as_deref(), Some("missing task 2"));
    assert_eq!(grade.checked_by, assistant.id);
}

#[tokio::test]
async fn should_drop_blank_reason() {
    let (store, f) = MockCourses::seeded();

    grade_usecase(&store)
        .execute(
            &actor(f.mentor_id, UserRole::Mentor),
            grade_input(f.submission_id, SubmissionStatus::Approved, Some("   ")),
        )
        .await
        .unwrap();

    assert_eq!(store.grade(f.submission_id).unwrap().reason, None);
}

#[tokio::test]
async fn should_reject_pending_as_grade() {
    let (store, f) = MockCourses::seeded();

    let err = grade_usecase(&store)
        .execute(
            &actor(f.mentor_id, UserRole::Mentor),
            grade_input(f.submission_id, SubmissionStatus::Pending, None),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CoursesServiceError::Validation(_)));
    assert!(store.grade(f.submission_id).is_none());
}

#[tokio::test]
async fn should_not_let_enrolled_student_grade() {
    let (store, f) = MockCourses::seeded();
    let student = store.add_user(UserRole::Student);
    store.purchase(student, f.course_id);

    let err = grade_usecase(&store)
        .execute(
            &actor(student, UserRole::Student),
            grade_input(f.submission_id, SubmissionStatus::Approved, None),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CoursesServiceError::Forbidden));
    assert!(store.grade(f.submission_id).is_none());
}

#[tokio::test]
async fn should_not_let_assistant_grade_other_course() {
    let (store, f) = MockCourses::seeded();
    let other = store.add_course(fixoo_domain::id::UserId::new());
    let assistant = assigned_assistant(&store, &other);

    let err = grade_usecase(&store)
        .execute(
            &assistant,
            grade_input(f.submission_id, SubmissionStatus::Approved, None),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoursesServiceError::Forbidden));
}

// ── Questions ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_mark_question_read_once() {
    let (store, f) = MockCourses::seeded();
    let assistant = assigned_assistant(&store, &f);
    let usecase = MarkQuestionReadUseCase {
        entitlement: store.entitlement(),
        content: store.clone(),
    };

    usecase.execute(&assistant, f.question_id).await.unwrap();
    let first = store.question(f.question_id).unwrap();
    assert!(first.read);
    assert!(first.read_at.is_some());

    usecase.execute(&assistant, f.question_id).await.unwrap();
    assert_eq!(store.question(f.question_id).unwrap().read_at, first.read_at);
}

#[tokio::test]
async fn should_answer_question_and_mark_it_read() {
    let (store, f) = MockCourses::seeded();
    let mentor = actor(f.mentor_id, UserRole::Mentor);
    let usecase = AnswerQuestionUseCase {
        entitlement: store.entitlement(),
        content: store.clone(),
    };

    usecase
        .execute(&mentor, f.question_id, " Use a loop. ")
        .await
        .unwrap();

    let question = store.question(f.question_id).unwrap();
    assert!(question.read);
    let answer = question.answer.unwrap();
    assert_eq!(answer.text, "Use a loop.");
    assert_eq!(answer.answered_by, mentor.id);
    assert_eq!(question.read_at, Some(answer.answered_at));
}

#[tokio::test]
async fn should_reject_blank_answer() {
    let (store, f) = MockCourses::seeded();
    let usecase = AnswerQuestionUseCase {
        entitlement: store.entitlement(),
        content: store.clone(),
    };

    let err = usecase
        .execute(&actor(f.mentor_id, UserRole::Mentor), f.question_id, "  \n")
        .await
        .unwrap_err();

    assert!(matches!(err, CoursesServiceError::Validation(_)));
    assert!(store.question(f.question_id).unwrap().answer.is_none());
}

#[tokio::test]
async fn should_not_let_student_answer_question() {
    let (store, f) = MockCourses::seeded();
    let student = store.add_user(UserRole::Student);
    store.purchase(student, f.course_id);
    let usecase = AnswerQuestionUseCase {
        entitlement: store.entitlement(),
        content: store.clone(),
    };

    let err = usecase
        .execute(&actor(student, UserRole::Student), f.question_id, "self answer")
        .await
        .unwrap_err();
    assert!(matches!(err, CoursesServiceError::Forbidden));
}
