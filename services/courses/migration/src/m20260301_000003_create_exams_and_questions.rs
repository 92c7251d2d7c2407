use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Exams::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Exams::LessonGroupId).uuid().not_null())
                    .col(ColumnDef::new(Exams::Question).text().not_null())
                    .col(ColumnDef::new(Exams::VariantA).string().not_null())
                    .col(ColumnDef::new(Exams::VariantB).string().not_null())
                    .col(ColumnDef::new(Exams::VariantC).string().not_null())
                    .col(ColumnDef::new(Exams::VariantD).string().not_null())
                    .col(ColumnDef::new(Exams::Answer).string_len(1).not_null())
                    .col(
                        ColumnDef::new(Exams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::LessonGroupId)
                            .to(LessonGroups::Table, LessonGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Questions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Questions::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Questions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Questions::Text).text().not_null())
                    .col(
                        ColumnDef::new(Questions::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Questions::ReadAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Questions::Answer).text().null())
                    .col(ColumnDef::new(Questions::AnsweredBy).uuid().null())
                    .col(
                        ColumnDef::new(Questions::AnsweredAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Questions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Questions::Table, Questions::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Exams::Table)
                    .col(Exams::LessonGroupId)
                    .name("idx_exams_lesson_group_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Questions::Table)
                    .col(Questions::CourseId)
                    .col((Questions::CreatedAt, IndexOrder::Desc))
                    .name("idx_questions_course_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Exams {
    Table,
    Id,
    LessonGroupId,
    Question,
    VariantA,
    VariantB,
    VariantC,
    VariantD,
    Answer,
    CreatedAt,
}

#[derive(Iden)]
enum Questions {
    Table,
    Id,
    CourseId,
    UserId,
    Text,
    Read,
    ReadAt,
    Answer,
    AnsweredBy,
    AnsweredAt,
    CreatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}

#[derive(Iden)]
enum LessonGroups {
    Table,
    Id,
}
