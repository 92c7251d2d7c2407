use sea_orm::entity::prelude::*;

/// Account record owned by the auth service. The courses service reads it
/// through its own read-only entity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique among active users only.
    pub phone: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub full_name: String,
    pub password_hash: String,
    /// `ADMIN`, `MENTOR`, `ASSISTANT` or `STUDENT`.
    pub role: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
