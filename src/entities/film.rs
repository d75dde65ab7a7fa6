use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "film")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub imdb_id: String,
    pub title: String,
    pub release_year: Option<i32>,
    pub rating: Option<String>,
    pub profile_url: Option<String>,
    pub filming_location: Option<String>,
    pub language: Option<String>,
    /// Truncated to 255 characters at import time.
    pub synopsis: Option<String>,
    pub country: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
