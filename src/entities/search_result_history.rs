use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "search_result_history")]
pub struct Model {
    /// Assigned by the application's id generator, never by the database.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub search_term: String,
    pub owner: String,
    pub timestamp: ChronoDateTimeUtc,
    #[sea_orm(column_type = "Text")]
    pub payload_json: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
