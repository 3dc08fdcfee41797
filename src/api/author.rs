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
use crate::models::author::Entity as AuthorEntity;
use crate::services::catalog_service;
use crate::services::resolve::BookRef;

#[derive(Deserialize)]
pub struct CreateAuthorRequest {
    name: String,
}

#[derive(Deserialize)]
pub struct PublishRequest {
    book_ids: Vec<i32>,
}

pub async fn list_authors(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match AuthorEntity::find().all(&db).await {
        Ok(authors) => (StatusCode::OK, Json(authors)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

pub async fn create_author(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateAuthorRequest>,
) -> impl IntoResponse {
    match catalog_service::add_author(&db, &payload.name).await {
        Ok(author) => (StatusCode::CREATED, Json(author)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_author(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match AuthorEntity::find_by_id(id).one(&db).await {
        Ok(Some(author)) => {
            let url = author.absolute_url();
            (StatusCode::OK, Json(json!({ "author": author, "url": url }))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Author not found" })),
        )
            .into_response(),
        Err(e) => error_response(e.into()),
    }
}

pub async fn delete_author(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match catalog_service::delete_author(&db, id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Author deleted" }))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Add one or more books to the author's published set.
pub async fn publish_books(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<PublishRequest>,
) -> impl IntoResponse {
    let author = match AuthorEntity::find_by_id(id).one(&db).await {
        Ok(Some(author)) => author,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Author not found" })),
            )
                .into_response()
        }
        Err(e) => return error_response(e.into()),
    };

    let books: Vec<BookRef> = payload.book_ids.into_iter().map(BookRef::Id).collect();
    match catalog_service::publish_books(&db, &author, books).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Books published" }))).into_response(),
        Err(e) => error_response(e),
    }
}
