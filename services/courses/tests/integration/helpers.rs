use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use fixoo_courses::domain::repository::{
    ContentRepository, CourseGraphRepository, EnrollmentRepository, UserDirectory,
};
use fixoo_courses::domain::types::{
    CourseResource, Enrollment, Exam, ExamAnswer, Grade, Grant, QuestionAnswer,
};
use fixoo_courses::error::CoursesServiceError;
use fixoo_courses::usecase::entitlement::ResolveEntitlementUseCase;
use fixoo_domain::entitlement::{Actor, CourseOwnership, StudentGrants};
use fixoo_domain::id::{
    CourseId, ExamId, HomeworkId, LessonGroupId, LessonId, QuestionId, SubmissionId, UserId,
};
use fixoo_domain::user::UserRole;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

pub fn actor(id: UserId, role: UserRole) -> Actor {
    Actor { id, role }
}

// ── MockCourses ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct QuestionState {
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub answer: Option<QuestionAnswer>,
}

#[derive(Default)]
pub struct Data {
    pub courses: HashMap<CourseId, UserId>,
    pub parents: HashMap<CourseResource, CourseResource>,
    pub enrollments: Vec<Enrollment>,
    pub roles: HashMap<UserId, UserRole>,
    pub exams: Vec<Exam>,
    pub grades: HashMap<SubmissionId, Grade>,
    pub questions: HashMap<QuestionId, QuestionState>,
}

/// In-memory course graph, enrollments, users and content. Implements every
/// repository port; clones share state.
#[derive(Clone, Default)]
pub struct MockCourses {
    pub data: Arc<Mutex<Data>>,
    pub staff_loads: Arc<AtomicUsize>,
    pub grant_loads: Arc<AtomicUsize>,
}

/// Ids of one fully linked course: course → group → lesson → homework →
/// submission, an exam under the group and a question on the course.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub course_id: CourseId,
    pub mentor_id: UserId,
    pub group_id: LessonGroupId,
    pub lesson_id: LessonId,
    pub homework_id: HomeworkId,
    pub submission_id: SubmissionId,
    pub exam_id: ExamId,
    pub question_id: QuestionId,
}

impl Fixture {
    pub fn resources(&self) -> [CourseResource; 7] {
        [
            CourseResource::Course(self.course_id),
            CourseResource::LessonGroup(self.group_id),
            CourseResource::Lesson(self.lesson_id),
            CourseResource::Homework(self.homework_id),
            CourseResource::HomeworkSubmission(self.submission_id),
            CourseResource::Exam(self.exam_id),
            CourseResource::Question(self.question_id),
        ]
    }
}

impl MockCourses {
    /// A store holding one course owned by a fresh mentor.
    pub fn seeded() -> (Self, Fixture) {
        let store = Self::default();
        let fixture = store.add_course(UserId::new());
        (store, fixture)
    }

    pub fn add_course(&self, mentor_id: UserId) -> Fixture {
        let f = Fixture {
            course_id: CourseId::new(),
            mentor_id,
            group_id: LessonGroupId::new(),
            lesson_id: LessonId::new(),
            homework_id: HomeworkId::new(),
            submission_id: SubmissionId::new(),
            exam_id: ExamId::new(),
            question_id: QuestionId::new(),
        };
        let mut data = self.data.lock().unwrap();
        data.courses.insert(f.course_id, mentor_id);
        data.roles.insert(mentor_id, UserRole::Mentor);
        let links = [
            (CourseResource::LessonGroup(f.group_id), CourseResource::Course(f.course_id)),
            (CourseResource::Lesson(f.lesson_id), CourseResource::LessonGroup(f.group_id)),
            (CourseResource::Homework(f.homework_id), CourseResource::Lesson(f.lesson_id)),
            (
                CourseResource::HomeworkSubmission(f.submission_id),
                CourseResource::Homework(f.homework_id),
            ),
            (CourseResource::Exam(f.exam_id), CourseResource::LessonGroup(f.group_id)),
            (CourseResource::Question(f.question_id), CourseResource::Course(f.course_id)),
        ];
        data.parents.extend(links);
        data.exams.push(Exam {
            id: f.exam_id,
            lesson_group_id: f.group_id,
            question: "Capital of Uzbekistan?".to_owned(),
            variant_a: "Samarkand".to_owned(),
            variant_b: "Tashkent".to_owned(),
            variant_c: "Bukhara".to_owned(),
            variant_d: "Khiva".to_owned(),
            answer: ExamAnswer::B,
        });
        data.questions.insert(f.question_id, QuestionState::default());
        f
    }

    /// Register a user with `role` and return its id.
    pub fn add_user(&self, role: UserRole) -> UserId {
        let id = UserId::new();
        self.data.lock().unwrap().roles.insert(id, role);
        id
    }

    pub fn enroll(&self, user_id: UserId, course_id: CourseId, grant: Grant) {
        self.data.lock().unwrap().enrollments.push(Enrollment {
            user_id,
            course_id,
            grant,
            created_at: Utc::now(),
        });
    }

    pub fn purchase(&self, user_id: UserId, course_id: CourseId) {
        self.enroll(
            user_id,
            course_id,
            Grant::Purchased {
                amount: 500_000,
                paid_via: Some("payme".to_owned()),
            },
        );
    }

    /// Remove a link so the chain above `resource` is broken.
    pub fn unlink(&self, resource: CourseResource) {
        self.data.lock().unwrap().parents.remove(&resource);
    }

    pub fn enrollments(&self) -> Vec<Enrollment> {
        self.data.lock().unwrap().enrollments.clone()
    }

    pub fn grade(&self, id: SubmissionId) -> Option<Grade> {
        self.data.lock().unwrap().grades.get(&id).cloned()
    }

    pub fn question(&self, id: QuestionId) -> Option<QuestionState> {
        self.data.lock().unwrap().questions.get(&id).cloned()
    }

    pub fn entitlement(&self) -> ResolveEntitlementUseCase<MockCourses, MockCourses> {
        ResolveEntitlementUseCase {
            graph: self.clone(),
            enrollments: self.clone(),
        }
    }
}

impl CourseGraphRepository for MockCourses {
    async fn find_course(
        &self,
        id: CourseId,
    ) -> Result<Option<CourseOwnership>, CoursesServiceError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .courses
            .get(&id)
            .map(|mentor_id| CourseOwnership { id, mentor_id: *mentor_id }))
    }

    async fn find_parent(
        &self,
        resource: CourseResource,
    ) -> Result<Option<CourseResource>, CoursesServiceError> {
        Ok(self.data.lock().unwrap().parents.get(&resource).copied())
    }
}

impl EnrollmentRepository for MockCourses {
    async fn student_grants(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<StudentGrants, CoursesServiceError> {
        self.grant_loads.fetch_add(1, Ordering::SeqCst);
        let mut grants = StudentGrants::default();
        for e in self.data.lock().unwrap().enrollments.iter() {
            if e.user_id == user_id && e.course_id == course_id {
                match e.grant {
                    Grant::Purchased { .. } => grants.purchased = true,
                    Grant::Assigned => grants.assigned = true,
                }
            }
        }
        Ok(grants)
    }

    async fn staff_assignments(
        &self,
        course_id: CourseId,
    ) -> Result<HashSet<UserId>, CoursesServiceError> {
        self.staff_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .data
            .lock()
            .unwrap()
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id && e.grant == Grant::Assigned)
            .map(|e| e.user_id)
            .collect())
    }

    async fn exists(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, CoursesServiceError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .enrollments
            .iter()
            .any(|e| e.user_id == user_id && e.course_id == course_id))
    }

    async fn create(&self, enrollment: &Enrollment) -> Result<(), CoursesServiceError> {
        let mut data = self.data.lock().unwrap();
        let taken = data
            .enrollments
            .iter()
            .any(|e| e.user_id == enrollment.user_id && e.course_id == enrollment.course_id);
        if taken {
            return Err(CoursesServiceError::AlreadyEnrolled);
        }
        data.enrollments.push(enrollment.clone());
        Ok(())
    }

    async fn remove_assignment(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, CoursesServiceError> {
        let mut data = self.data.lock().unwrap();
        let before = data.enrollments.len();
        data.enrollments.retain(|e| {
            !(e.user_id == user_id && e.course_id == course_id && e.grant == Grant::Assigned)
        });
        Ok(data.enrollments.len() < before)
    }
}

impl UserDirectory for MockCourses {
    async fn find_role(&self, id: UserId) -> Result<Option<UserRole>, CoursesServiceError> {
        Ok(self.data.lock().unwrap().roles.get(&id).copied())
    }
}

impl ContentRepository for MockCourses {
    async fn list_exams(&self, group_id: LessonGroupId) -> Result<Vec<Exam>, CoursesServiceError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .exams
            .iter()
            .filter(|e| e.lesson_group_id == group_id)
            .cloned()
            .collect())
    }

    async fn delete_lesson(&self, id: LessonId) -> Result<bool, CoursesServiceError> {
        let removed = self
            .data
            .lock()
            .unwrap()
            .parents
            .remove(&CourseResource::Lesson(id));
        Ok(removed.is_some())
    }

    async fn grade_submission(
        &self,
        id: SubmissionId,
        grade: &Grade,
    ) -> Result<bool, CoursesServiceError> {
        let mut data = self.data.lock().unwrap();
        if !data
            .parents
            .contains_key(&CourseResource::HomeworkSubmission(id))
        {
            return Ok(false);
        }
        data.grades.insert(id, grade.clone());
        Ok(true)
    }

    async fn mark_question_read(
        &self,
        id: QuestionId,
        at: DateTime<Utc>,
    ) -> Result<bool, CoursesServiceError> {
        let mut data = self.data.lock().unwrap();
        match data.questions.get_mut(&id) {
            Some(q) => {
                q.read = true;
                q.read_at.get_or_insert(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn answer_question(
        &self,
        id: QuestionId,
        answer: &QuestionAnswer,
    ) -> Result<bool, CoursesServiceError> {
        let mut data = self.data.lock().unwrap();
        match data.questions.get_mut(&id) {
            Some(q) => {
                q.read = true;
                q.read_at.get_or_insert(answer.answered_at);
                q.answer = Some(answer.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
