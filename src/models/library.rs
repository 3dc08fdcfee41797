use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "libraries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub location: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book::Entity")]
    Book,
}

// Holdings, via the junction table. Independent of books.library_id:
// a book shelved in one library can be cross-listed in several others.
impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        super::library_books::Relation::Book.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::library_books::Relation::Library.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn absolute_url(&self) -> String {
        format!("/api/libraries/{}", self.id)
    }
}
