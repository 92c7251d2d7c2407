pub mod course_enrollments;
pub mod courses;
pub mod exams;
pub mod homework_submissions;
pub mod homeworks;
pub mod lesson_groups;
pub mod lessons;
pub mod questions;
pub mod users;
