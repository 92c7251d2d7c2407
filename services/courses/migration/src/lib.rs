use sea_orm_migration::prelude::*;

mod m20260301_000001_create_course_graph;
mod m20260301_000002_create_homework;
mod m20260301_000003_create_exams_and_questions;
mod m20260301_000004_create_course_enrollments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_course_graph::Migration),
            Box::new(m20260301_000002_create_homework::Migration),
            Box::new(m20260301_000003_create_exams_and_questions::Migration),
            Box::new(m20260301_000004_create_course_enrollments::Migration),
        ]
    }

    // The auth migrator shares the database and keeps the default table.
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_courses").into_iden()
    }
}
