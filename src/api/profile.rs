use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::auth::Claims;

/// The one authentication-gated read. Extraction of `Claims` redirects to
/// the login page when no valid token is presented.
pub async fn profile(claims: Claims) -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "username": claims.sub })))
}
