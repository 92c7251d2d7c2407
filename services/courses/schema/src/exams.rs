use sea_orm::entity::prelude::*;

/// Multiple-choice question attached to a lesson group.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub lesson_group_id: Uuid,
    pub question: String,
    pub variant_a: String,
    pub variant_b: String,
    pub variant_c: String,
    pub variant_d: String,
    /// `A`, `B`, `C` or `D`.
    pub answer: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lesson_groups::Entity",
        from = "Column::LessonGroupId",
        to = "super::lesson_groups::Column::Id",
        on_delete = "Cascade"
    )]
    LessonGroup,
}

impl Related<super::lesson_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LessonGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
