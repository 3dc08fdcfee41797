use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;

/// Build the full application router with the API nested under /api.
pub fn build_router(db: DatabaseConnection) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::health::index))
        .route("/login", get(api::auth::login_page))
        .nest("/api", api::api_router(db))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
