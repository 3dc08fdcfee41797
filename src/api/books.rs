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
use crate::models::{author, book::Entity as BookEntity, library};
use crate::services::catalog_service;

#[derive(Deserialize)]
pub struct CreateBookRequest {
    title: String,
    genre: String,
    author_id: i32,
    #[serde(default)]
    library_id: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateBookRequest {
    title: String,
    genre: String,
    #[serde(default)]
    library_id: Option<i32>,
}

pub async fn list_books(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match BookEntity::find().all(&db).await {
        Ok(books) => (StatusCode::OK, Json(books)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

pub async fn create_book(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateBookRequest>,
) -> impl IntoResponse {
    // The service takes resolved entities, so the ids are looked up first
    let author = match author::Entity::find_by_id(payload.author_id).one(&db).await {
        Ok(Some(author)) => author,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "author_id does not resolve to an author" })),
            )
                .into_response()
        }
        Err(e) => return error_response(e.into()),
    };

    let shelf = match payload.library_id {
        None => None,
        Some(library_id) => match library::Entity::find_by_id(library_id).one(&db).await {
            Ok(Some(lib)) => Some(lib),
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "library_id does not resolve to a library" })),
                )
                    .into_response()
            }
            Err(e) => return error_response(e.into()),
        },
    };

    match catalog_service::add_book(&db, &payload.title, &payload.genre, &author, shelf.as_ref())
        .await
    {
        Ok(book) => (StatusCode::CREATED, Json(book)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match BookEntity::find_by_id(id).one(&db).await {
        Ok(Some(book)) => {
            let url = book.absolute_url();
            (StatusCode::OK, Json(json!({ "book": book, "url": url }))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Book not found" })),
        )
            .into_response(),
        Err(e) => error_response(e.into()),
    }
}

pub async fn update_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBookRequest>,
) -> impl IntoResponse {
    match catalog_service::update_book(&db, id, &payload.title, &payload.genre, payload.library_id)
        .await
    {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match catalog_service::delete_book(&db, id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Book deleted" }))).into_response(),
        Err(e) => error_response(e),
    }
}
