use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseEnrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseEnrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseEnrollments::UserId).uuid().not_null())
                    .col(ColumnDef::new(CourseEnrollments::CourseId).uuid().not_null())
                    .col(
                        ColumnDef::new(CourseEnrollments::Kind)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseEnrollments::Amount).big_integer().null())
                    .col(ColumnDef::new(CourseEnrollments::PaidVia).string().null())
                    .col(
                        ColumnDef::new(CourseEnrollments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseEnrollments::Table, CourseEnrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Purchased and assigned access never coexist for the same pair.
        manager
            .create_index(
                Index::create()
                    .table(CourseEnrollments::Table)
                    .col(CourseEnrollments::UserId)
                    .col(CourseEnrollments::CourseId)
                    .unique()
                    .name("uq_course_enrollments_user_id_course_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(CourseEnrollments::Table)
                    .col(CourseEnrollments::CourseId)
                    .col(CourseEnrollments::Kind)
                    .name("idx_course_enrollments_course_id_kind")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseEnrollments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CourseEnrollments {
    Table,
    Id,
    UserId,
    CourseId,
    Kind,
    Amount,
    PaidVia,
    CreatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}
