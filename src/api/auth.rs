use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::auth;
use crate::domain::CatalogError;
use crate::models::user;

#[derive(Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

pub async fn register(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if payload.username.is_empty() || payload.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "username and password must not be empty" })),
        )
            .into_response();
    }

    let password_hash = match auth::hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => return error_response(CatalogError::Database(e)),
    };

    let now = chrono::Utc::now().to_rfc3339();
    let model = user::ActiveModel {
        username: Set(payload.username),
        password_hash: Set(password_hash),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match model.insert(&db).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let found = user::Entity::find()
        .filter(user::Column::Username.eq(&payload.username))
        .one(&db)
        .await;

    let account = match found {
        Ok(Some(account)) => account,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response()
        }
        Err(e) => return error_response(e.into()),
    };

    match auth::verify_password(&payload.password, &account.password_hash) {
        Ok(true) => {}
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response()
        }
    }

    match auth::create_jwt(&account.username) {
        Ok(token) => (StatusCode::OK, Json(json!({ "token": token }))).into_response(),
        Err(e) => error_response(CatalogError::Database(e)),
    }
}

/// Target of the unauthenticated-profile redirect.
pub async fn login_page() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "message": "Log in via POST /api/auth/login" })),
    )
}
