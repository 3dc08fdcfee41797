//! Polymorphic entity references.
//!
//! Lookup operations accept either a resolved entity or its natural key
//! (author name, library location, book id). Resolution happens before the
//! operation proper; an unresolved key and a wrong-shaped input both come
//! back as `InvalidArgument` so callers see a single failure kind.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::domain::CatalogError;
use crate::models::{author, book, library};

/// An author, by reference or by unique name.
#[derive(Debug, Clone)]
pub enum AuthorRef {
    Author(author::Model),
    Name(String),
}

impl From<author::Model> for AuthorRef {
    fn from(model: author::Model) -> Self {
        AuthorRef::Author(model)
    }
}

impl From<&str> for AuthorRef {
    fn from(name: &str) -> Self {
        AuthorRef::Name(name.to_string())
    }
}

impl From<String> for AuthorRef {
    fn from(name: String) -> Self {
        AuthorRef::Name(name)
    }
}

/// A library, by reference or by unique location.
#[derive(Debug, Clone)]
pub enum LibraryRef {
    Library(library::Model),
    Location(String),
}

impl From<library::Model> for LibraryRef {
    fn from(model: library::Model) -> Self {
        LibraryRef::Library(model)
    }
}

impl From<&str> for LibraryRef {
    fn from(location: &str) -> Self {
        LibraryRef::Location(location.to_string())
    }
}

impl From<String> for LibraryRef {
    fn from(location: String) -> Self {
        LibraryRef::Location(location)
    }
}

/// A book, by reference or by primary key. An id that resolves to no stored
/// book is treated the same as a wrong-shaped argument.
#[derive(Debug, Clone)]
pub enum BookRef {
    Book(book::Model),
    Id(i32),
}

impl From<book::Model> for BookRef {
    fn from(model: book::Model) -> Self {
        BookRef::Book(model)
    }
}

impl From<i32> for BookRef {
    fn from(id: i32) -> Self {
        BookRef::Id(id)
    }
}

pub async fn resolve_author<C: ConnectionTrait>(
    db: &C,
    author: AuthorRef,
) -> Result<author::Model, CatalogError> {
    match author {
        AuthorRef::Author(model) => Ok(model),
        AuthorRef::Name(name) => author::Entity::find()
            .filter(author::Column::Name.eq(&name))
            .one(db)
            .await?
            .ok_or_else(|| CatalogError::InvalidArgument(format!("wrong author name: {}", name))),
    }
}

pub async fn resolve_library<C: ConnectionTrait>(
    db: &C,
    library: LibraryRef,
) -> Result<library::Model, CatalogError> {
    match library {
        LibraryRef::Library(model) => Ok(model),
        LibraryRef::Location(location) => library::Entity::find()
            .filter(library::Column::Location.eq(&location))
            .one(db)
            .await?
            .ok_or_else(|| {
                CatalogError::InvalidArgument(format!("wrong library location: {}", location))
            }),
    }
}

pub async fn resolve_book<C: ConnectionTrait>(
    db: &C,
    book: BookRef,
) -> Result<book::Model, CatalogError> {
    match book {
        BookRef::Book(model) => Ok(model),
        BookRef::Id(id) => book::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| CatalogError::InvalidArgument(format!("no book with id {}", id))),
    }
}
