//! Catalog operations - creation and relationship mutation, no HTTP layer.
//!
//! Uniqueness of author names and library locations is enforced by the
//! store's UNIQUE constraints; the DbErr conversion in `domain::errors`
//! classifies those failures. Batch mutations run in one transaction and
//! commit only if every element resolves (all-or-nothing).
#![allow(clippy::needless_update)] // SeaORM ActiveModels require ..Default::default()

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait,
};

use crate::domain::CatalogError;
use crate::models::{author, author_books, book, library, library_books};
use crate::services::resolve::{resolve_book, BookRef};

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_TITLE_LEN: usize = 50;
pub const MAX_GENRE_LEN: usize = 25;
pub const MAX_LOCATION_LEN: usize = 100;

fn check_len(field: &str, value: &str, max: usize) -> Result<(), CatalogError> {
    if value.chars().count() > max {
        return Err(CatalogError::InvalidArgument(format!(
            "{} exceeds {} characters",
            field, max
        )));
    }
    Ok(())
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), CatalogError> {
    if value.is_empty() {
        return Err(CatalogError::InvalidArgument(format!(
            "{} must not be empty",
            field
        )));
    }
    check_len(field, value, max)
}

pub async fn add_author(
    db: &DatabaseConnection,
    name: &str,
) -> Result<author::Model, CatalogError> {
    check_text("name", name, MAX_NAME_LEN)?;

    let now = chrono::Utc::now().to_rfc3339();
    let model = author::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    tracing::info!("Created author {} ({})", created.name, created.id);
    Ok(created)
}

pub async fn add_library(
    db: &DatabaseConnection,
    location: &str,
) -> Result<library::Model, CatalogError> {
    check_text("location", location, MAX_LOCATION_LEN)?;

    let now = chrono::Utc::now().to_rfc3339();
    let model = library::ActiveModel {
        location: Set(location.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    tracing::info!("Created library {} ({})", created.location, created.id);
    Ok(created)
}

/// Create a book owned by `author`, optionally shelved in `library`.
/// Titles are not unique: identical title+genre under different authors
/// coexist as distinct rows. Genre may be empty, the title may not.
pub async fn add_book(
    db: &DatabaseConnection,
    title: &str,
    genre: &str,
    author: &author::Model,
    library: Option<&library::Model>,
) -> Result<book::Model, CatalogError> {
    check_text("title", title, MAX_TITLE_LEN)?;
    check_len("genre", genre, MAX_GENRE_LEN)?;

    let now = chrono::Utc::now().to_rfc3339();
    let model = book::ActiveModel {
        title: Set(title.to_string()),
        genre: Set(genre.to_string()),
        author_id: Set(author.id),
        library_id: Set(library.map(|l| l.id)),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

async fn insert_published<C: ConnectionTrait>(
    db: &C,
    author_id: i32,
    book: BookRef,
) -> Result<(), CatalogError> {
    let book = resolve_book(db, book).await?;

    // Set semantics: publishing an already-published book is a no-op
    let existing = author_books::Entity::find_by_id((author_id, book.id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let membership = author_books::ActiveModel {
        author_id: Set(author_id),
        book_id: Set(book.id),
    };
    author_books::Entity::insert(membership).exec(db).await?;
    Ok(())
}

/// Add `book` to the author's published set (the promotional/listing
/// relation, independent of the book's author_id).
pub async fn publish_book(
    db: &DatabaseConnection,
    author: &author::Model,
    book: BookRef,
) -> Result<(), CatalogError> {
    insert_published(db, author.id, book).await
}

/// Publish each book in order, atomically: if any element fails to resolve,
/// no membership is added.
pub async fn publish_books(
    db: &DatabaseConnection,
    author: &author::Model,
    books: Vec<BookRef>,
) -> Result<(), CatalogError> {
    let txn = db.begin().await?;
    for book in books {
        insert_published(&txn, author.id, book).await?;
    }
    txn.commit().await?;
    Ok(())
}

async fn insert_holding<C: ConnectionTrait>(
    db: &C,
    library_id: i32,
    book: BookRef,
) -> Result<(), CatalogError> {
    let book = resolve_book(db, book).await?;

    let existing = library_books::Entity::find_by_id((library_id, book.id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let membership = library_books::ActiveModel {
        library_id: Set(library_id),
        book_id: Set(book.id),
    };
    library_books::Entity::insert(membership).exec(db).await?;
    Ok(())
}

/// Add `book` to the library's holdings (independent of the book's direct
/// library_id field - a book can be cross-listed in many libraries).
pub async fn add_book_to_library(
    db: &DatabaseConnection,
    library: &library::Model,
    book: BookRef,
) -> Result<(), CatalogError> {
    insert_holding(db, library.id, book).await
}

/// Holdings analogue of `publish_books`, same all-or-nothing contract.
pub async fn add_books_to_library(
    db: &DatabaseConnection,
    library: &library::Model,
    books: Vec<BookRef>,
) -> Result<(), CatalogError> {
    let txn = db.begin().await?;
    for book in books {
        insert_holding(&txn, library.id, book).await?;
    }
    txn.commit().await?;
    Ok(())
}

pub async fn update_book(
    db: &DatabaseConnection,
    id: i32,
    title: &str,
    genre: &str,
    library_id: Option<i32>,
) -> Result<book::Model, CatalogError> {
    check_text("title", title, MAX_TITLE_LEN)?;
    check_len("genre", genre, MAX_GENRE_LEN)?;

    let existing = book::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound)?;

    let mut active: book::ActiveModel = existing.into();
    active.title = Set(title.to_string());
    active.genre = Set(genre.to_string());
    active.library_id = Set(library_id);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    Ok(active.update(db).await?)
}

pub async fn delete_author(db: &DatabaseConnection, id: i32) -> Result<(), CatalogError> {
    let result = author::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(CatalogError::NotFound);
    }
    tracing::info!("Deleted author {}", id);
    Ok(())
}

pub async fn delete_library(db: &DatabaseConnection, id: i32) -> Result<(), CatalogError> {
    let result = library::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(CatalogError::NotFound);
    }
    tracing::info!("Deleted library {}", id);
    Ok(())
}

pub async fn delete_book(db: &DatabaseConnection, id: i32) -> Result<(), CatalogError> {
    let result = book::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(CatalogError::NotFound);
    }
    Ok(())
}
