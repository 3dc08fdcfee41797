use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub author_id: i32,
    /// Direct shelving assignment. Cross-listing in other libraries goes
    /// through the `library_books` junction instead.
    pub library_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::library::Entity",
        from = "Column::LibraryId",
        to = "super::library::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Library,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::library::Entity> for Entity {
    fn to() -> RelationDef {
        super::library_books::Relation::Library.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::library_books::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Canonical API path for this book (Django `get_absolute_url` analogue).
    pub fn absolute_url(&self) -> String {
        format!("/api/books/{}", self.id)
    }
}
