use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::models::library::Entity as LibraryEntity;
use crate::services::catalog_service;
use crate::services::resolve::BookRef;

#[derive(Deserialize)]
pub struct CreateLibraryRequest {
    location: String,
}

#[derive(Deserialize)]
pub struct AddBooksRequest {
    book_ids: Vec<i32>,
}

pub async fn list_libraries(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match LibraryEntity::find().all(&db).await {
        Ok(libraries) => (StatusCode::OK, Json(libraries)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

pub async fn create_library(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateLibraryRequest>,
) -> impl IntoResponse {
    match catalog_service::add_library(&db, &payload.location).await {
        Ok(library) => (StatusCode::CREATED, Json(library)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_library(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match LibraryEntity::find_by_id(id).one(&db).await {
        Ok(Some(library)) => {
            let url = library.absolute_url();
            (
                StatusCode::OK,
                Json(json!({ "library": library, "url": url })),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Library not found" })),
        )
            .into_response(),
        Err(e) => error_response(e.into()),
    }
}

pub async fn delete_library(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match catalog_service::delete_library(&db, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Library deleted" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Add one or more books to the library's holdings.
pub async fn add_books(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<AddBooksRequest>,
) -> impl IntoResponse {
    let library = match LibraryEntity::find_by_id(id).one(&db).await {
        Ok(Some(library)) => library,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Library not found" })),
            )
                .into_response()
        }
        Err(e) => return error_response(e.into()),
    };

    let books: Vec<BookRef> = payload.book_ids.into_iter().map(BookRef::Id).collect();
    match catalog_service::add_books_to_library(&db, &library, books).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Books added" }))).into_response(),
        Err(e) => error_response(e),
    }
}
