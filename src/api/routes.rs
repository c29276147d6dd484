//! HTTP API route definitions.

use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{add_todo, delete_todo, list_todos, AppState};
use crate::auth::require_auth;

/// Create the API router.
///
/// The auth gate wraps the fallback as well, so unknown paths are also
/// rejected before they can 404.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/todos/:username",
            get(list_todos).post(add_todo).delete(delete_todo),
        )
        .fallback(not_found)
        .layer(from_fn_with_state(state.authorizer.clone(), require_auth))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
