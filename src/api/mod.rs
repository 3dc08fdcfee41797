pub mod auth;
pub mod author;
pub mod books;
pub mod health;
pub mod library;
pub mod profile;
pub mod query;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::domain::CatalogError;

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/profile", get(profile::profile))
        // Authors
        .route("/authors", get(author::list_authors).post(author::create_author))
        .route(
            "/authors/:id",
            get(author::get_author).delete(author::delete_author),
        )
        .route("/authors/:id/publish", post(author::publish_books))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Libraries
        .route(
            "/libraries",
            get(library::list_libraries).post(library::create_library),
        )
        .route(
            "/libraries/:id",
            get(library::get_library).delete(library::delete_library),
        )
        .route("/libraries/:id/books", post(library::add_books))
        // Queries
        .route("/query/books-by-author", get(query::books_by_author))
        .route("/query/books-in-library", get(query::books_in_library))
        .route("/query/title-counts", get(query::title_counts))
        .route("/query/titles-by-author", get(query::titles_by_author))
        .route(
            "/query/libraries-with-book/:book_id",
            get(query::libraries_with_book),
        )
        .with_state(db)
}

/// Translate a catalog failure into the JSON error body the API speaks.
pub(crate) fn error_response(err: CatalogError) -> Response {
    let status = match &err {
        CatalogError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        CatalogError::UniquenessViolation(_) => StatusCode::CONFLICT,
        CatalogError::NotFound => StatusCode::NOT_FOUND,
        CatalogError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
