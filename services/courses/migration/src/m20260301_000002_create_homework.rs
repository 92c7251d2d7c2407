use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Homeworks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Homeworks::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Homeworks::LessonId).uuid().not_null())
                    .col(ColumnDef::new(Homeworks::Task).text().not_null())
                    .col(
                        ColumnDef::new(Homeworks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Homeworks::Table, Homeworks::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HomeworkSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HomeworkSubmissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HomeworkSubmissions::HomeworkId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HomeworkSubmissions::UserId).uuid().not_null())
                    .col(ColumnDef::new(HomeworkSubmissions::Text).text().not_null())
                    .col(
                        ColumnDef::new(HomeworkSubmissions::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(ColumnDef::new(HomeworkSubmissions::Reason).text().null())
                    .col(ColumnDef::new(HomeworkSubmissions::CheckedBy).uuid().null())
                    .col(
                        ColumnDef::new(HomeworkSubmissions::CheckedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HomeworkSubmissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(HomeworkSubmissions::Table, HomeworkSubmissions::HomeworkId)
                            .to(Homeworks::Table, Homeworks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(HomeworkSubmissions::Table)
                    .col(HomeworkSubmissions::HomeworkId)
                    .name("idx_homework_submissions_homework_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HomeworkSubmissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Homeworks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Homeworks {
    Table,
    Id,
    LessonId,
    Task,
    CreatedAt,
}

#[derive(Iden)]
enum HomeworkSubmissions {
    Table,
    Id,
    HomeworkId,
    UserId,
    Text,
    Status,
    Reason,
    CheckedBy,
    CheckedAt,
    CreatedAt,
}

#[derive(Iden)]
enum Lessons {
    Table,
    Id,
}
