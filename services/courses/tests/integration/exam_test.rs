use fixoo_courses::domain::types::{ExamAnswer, ExamSheet, Grant};
use fixoo_courses::error::CoursesServiceError;
use fixoo_courses::usecase::exam::ListGroupExamsUseCase;
use fixoo_domain::entitlement::Actor;
use fixoo_domain::id::{LessonGroupId, UserId};
use fixoo_domain::user::UserRole;

use crate::helpers::{MockCourses, actor};

async fn list(
    store: &MockCourses,
    who: &Actor,
    group_id: LessonGroupId,
) -> Result<ExamSheet, CoursesServiceError> {
    let usecase = ListGroupExamsUseCase {
        entitlement: store.entitlement(),
        content: store.clone(),
    };
    usecase.execute(who, group_id).await
}

#[tokio::test]
async fn should_give_owner_the_answer_key() {
    let (store, f) = MockCourses::seeded();

    let sheet = list(&store, &actor(f.mentor_id, UserRole::Mentor), f.group_id)
        .await
        .unwrap();

    match sheet {
        ExamSheet::WithAnswers(exams) => {
            assert_eq!(exams.len(), 1);
            assert_eq!(exams[0].answer, ExamAnswer::B);
        }
        other => panic!("expected answers, got {other:?}"),
    }
}

#[tokio::test]
async fn should_give_assigned_assistant_the_answer_key() {
    let (store, f) = MockCourses::seeded();
    let assistant = store.add_user(UserRole::Assistant);
    store.enroll(assistant, f.course_id, Grant::Assigned);

    let sheet = list(&store, &actor(assistant, UserRole::Assistant), f.group_id)
        .await
        .unwrap();
    assert!(matches!(sheet, ExamSheet::WithAnswers(_)));
}

#[tokio::test]
async fn should_hide_answers_from_enrolled_student() {
    let (store, f) = MockCourses::seeded();
    let student = store.add_user(UserRole::Student);
    store.purchase(student, f.course_id);

    let sheet = list(&store, &actor(student, UserRole::Student), f.group_id)
        .await
        .unwrap();

    let ExamSheet::Questions(questions) = &sheet else {
        panic!("expected questions only, got {sheet:?}");
    };
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].id, f.exam_id);
    let json = serde_json::to_value(&sheet).unwrap();
    assert!(json[0].get("answer").is_none());
}

#[tokio::test]
async fn should_refuse_students_without_access() {
    let (store, f) = MockCourses::seeded();
    let student = store.add_user(UserRole::Student);

    let err = list(&store, &actor(student, UserRole::Student), f.group_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CoursesServiceError::Forbidden));
}

#[tokio::test]
async fn should_refuse_unassigned_assistant() {
    let (store, f) = MockCourses::seeded();

    let err = list(&store, &actor(UserId::new(), UserRole::Assistant), f.group_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CoursesServiceError::Forbidden));
}

#[tokio::test]
async fn should_report_unknown_group_as_not_found() {
    let (store, _) = MockCourses::seeded();

    let err = list(&store, &actor(UserId::new(), UserRole::Admin), LessonGroupId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CoursesServiceError::NotFound("lesson group")));
}
