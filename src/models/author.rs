use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book::Entity")]
    Book,
}

// "Published" books, via the junction table. Distinct from authorship:
// a book's author_id is set at creation and never implies membership here.
impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        super::author_books::Relation::Book.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::author_books::Relation::Author.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn absolute_url(&self) -> String {
        format!("/api/authors/{}", self.id)
    }
}
