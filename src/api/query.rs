use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::domain::CatalogError;
use crate::models::{author, library};
use crate::services::query_service;
use crate::services::resolve::{AuthorRef, BookRef, LibraryRef};

/// Author selector: by id (resolved reference) or by unique name.
#[derive(Deserialize)]
pub struct AuthorParams {
    #[serde(default)]
    id: Option<i32>,
    #[serde(default)]
    name: Option<String>,
}

/// Library selector: by id or by unique location.
#[derive(Deserialize)]
pub struct LibraryParams {
    #[serde(default)]
    id: Option<i32>,
    #[serde(default)]
    location: Option<String>,
}

async fn author_ref(
    db: &DatabaseConnection,
    params: AuthorParams,
) -> Result<AuthorRef, CatalogError> {
    match (params.id, params.name) {
        (Some(id), _) => {
            let author = author::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| {
                    CatalogError::InvalidArgument(format!("no author with id {}", id))
                })?;
            Ok(AuthorRef::Author(author))
        }
        (None, Some(name)) => Ok(AuthorRef::Name(name)),
        (None, None) => Err(CatalogError::InvalidArgument(
            "expected an author id or name".to_string(),
        )),
    }
}

async fn library_ref(
    db: &DatabaseConnection,
    params: LibraryParams,
) -> Result<LibraryRef, CatalogError> {
    match (params.id, params.location) {
        (Some(id), _) => {
            let library = library::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| {
                    CatalogError::InvalidArgument(format!("no library with id {}", id))
                })?;
            Ok(LibraryRef::Library(library))
        }
        (None, Some(location)) => Ok(LibraryRef::Location(location)),
        (None, None) => Err(CatalogError::InvalidArgument(
            "expected a library id or location".to_string(),
        )),
    }
}

pub async fn books_by_author(
    State(db): State<DatabaseConnection>,
    Query(params): Query<AuthorParams>,
) -> impl IntoResponse {
    let author = match author_ref(&db, params).await {
        Ok(author) => author,
        Err(e) => return error_response(e),
    };
    match query_service::view_books_by_author(&db, author).await {
        Ok(books) => (StatusCode::OK, Json(books)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn books_in_library(
    State(db): State<DatabaseConnection>,
    Query(params): Query<LibraryParams>,
) -> impl IntoResponse {
    let library = match library_ref(&db, params).await {
        Ok(library) => library,
        Err(e) => return error_response(e),
    };
    match query_service::view_books_in_library(&db, library).await {
        Ok(books) => (StatusCode::OK, Json(books)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn title_counts(
    State(db): State<DatabaseConnection>,
    Query(params): Query<LibraryParams>,
) -> impl IntoResponse {
    let library = match library_ref(&db, params).await {
        Ok(library) => library,
        Err(e) => return error_response(e),
    };
    match query_service::count_titles(&db, library).await {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn titles_by_author(
    State(db): State<DatabaseConnection>,
    Query(params): Query<AuthorParams>,
) -> impl IntoResponse {
    let author = match author_ref(&db, params).await {
        Ok(author) => author,
        Err(e) => return error_response(e),
    };
    match query_service::view_titles_by_author(&db, author).await {
        Ok(titles) => (StatusCode::OK, Json(titles)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn libraries_with_book(
    State(db): State<DatabaseConnection>,
    Path(book_id): Path<i32>,
) -> impl IntoResponse {
    match query_service::find_libraries_with_book(&db, BookRef::Id(book_id)).await {
        Ok(libraries) => (
            StatusCode::OK,
            Json(json!({ "libraries": libraries })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
