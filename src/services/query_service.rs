//! Read-side queries and aggregates over the catalog.
//!
//! Every lookup takes a polymorphic reference (entity or natural key) and
//! resolves it first; see `services::resolve` for the failure contract.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;

use crate::domain::CatalogError;
use crate::models::{book, library};
use crate::services::resolve::{
    resolve_author, resolve_book, resolve_library, AuthorRef, BookRef, LibraryRef,
};

/// Occurrence count for one distinct title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleCount {
    pub title: String,
    pub count: u32,
}

/// All books authored by the given author, in creation order.
pub async fn view_books_by_author(
    db: &DatabaseConnection,
    author: AuthorRef,
) -> Result<Vec<book::Model>, CatalogError> {
    let author = resolve_author(db, author).await?;

    let books = book::Entity::find()
        .filter(book::Column::AuthorId.eq(author.id))
        .order_by_asc(book::Column::Id)
        .all(db)
        .await?;
    Ok(books)
}

/// All books whose direct library field points at the given library, in
/// creation order. Holdings (cross-listings) are not consulted here.
pub async fn view_books_in_library(
    db: &DatabaseConnection,
    library: LibraryRef,
) -> Result<Vec<book::Model>, CatalogError> {
    let library = resolve_library(db, library).await?;

    let books = book::Entity::find()
        .filter(book::Column::LibraryId.eq(library.id))
        .order_by_asc(book::Column::Id)
        .all(db)
        .await?;
    Ok(books)
}

/// Occurrence count per distinct title among the library's directly-shelved
/// books. Pairs appear in first-occurrence order.
pub async fn count_titles(
    db: &DatabaseConnection,
    library: LibraryRef,
) -> Result<Vec<TitleCount>, CatalogError> {
    let library = resolve_library(db, library).await?;

    let books = book::Entity::find()
        .filter(book::Column::LibraryId.eq(library.id))
        .order_by_asc(book::Column::Id)
        .all(db)
        .await?;

    let mut counts: Vec<TitleCount> = Vec::new();
    for book in books {
        match counts.iter_mut().find(|c| c.title == book.title) {
            Some(entry) => entry.count += 1,
            None => counts.push(TitleCount {
                title: book.title,
                count: 1,
            }),
        }
    }
    Ok(counts)
}

/// Distinct titles among the author's authored books, first-occurrence
/// order, case-sensitive exact match.
pub async fn view_titles_by_author(
    db: &DatabaseConnection,
    author: AuthorRef,
) -> Result<Vec<String>, CatalogError> {
    let author = resolve_author(db, author).await?;

    let books = book::Entity::find()
        .filter(book::Column::AuthorId.eq(author.id))
        .order_by_asc(book::Column::Id)
        .all(db)
        .await?;

    let mut titles: Vec<String> = Vec::new();
    for book in books {
        if !titles.contains(&book.title) {
            titles.push(book.title);
        }
    }
    Ok(titles)
}

/// Every library whose holdings contain the book, each once, in id order.
/// The book's direct library field plays no part here.
pub async fn find_libraries_with_book(
    db: &DatabaseConnection,
    book: BookRef,
) -> Result<Vec<library::Model>, CatalogError> {
    let book = resolve_book(db, book).await?;

    let libraries = book
        .find_related(library::Entity)
        .order_by_asc(library::Column::Id)
        .all(db)
        .await?;
    Ok(libraries)
}
