//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::requests::{AddTodoRequest, DeleteTodoRequest};
use crate::auth::Authorizer;
use crate::metrics::{self, LatencyTimer};
use crate::store::TodoStore;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Todo lists by username.
    pub store: TodoStore,
    /// Authorization predicate applied to every request.
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    /// Create new app state.
    pub fn new(store: TodoStore, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { store, authorizer }
    }
}

/// Response for successful mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always "success".
    pub status: String,
}

impl StatusResponse {
    fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// `GET /todos/{username}` - the user's todos in insertion order.
#[instrument(skip_all, fields(username = %username))]
pub async fn list_todos(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Json<Vec<String>> {
    let _timer = LatencyTimer::new("list_todos");
    let todos = state.store.list(&username);
    debug!(count = todos.len(), "listed todos");
    Json(todos)
}

/// `POST /todos/{username}` - append a todo. Always succeeds.
#[instrument(skip_all, fields(username = %username))]
pub async fn add_todo(
    State(state): State<AppState>,
    Path(username): Path<String>,
    body: Bytes,
) -> Json<StatusResponse> {
    let _timer = LatencyTimer::new("add_todo");
    let request = AddTodoRequest::from_body(&body);

    state.store.add(&username, request.todo);
    metrics::inc_todos_added();
    metrics::set_users(state.store.user_count());

    Json(StatusResponse::success())
}

/// `DELETE /todos/{username}` - remove a todo by index.
///
/// Reports success whether or not anything was removed.
// TODO: surface a 404 for out-of-range indices once clients stop relying on
// the unconditional success body.
#[instrument(skip_all, fields(username = %username))]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(username): Path<String>,
    body: Bytes,
) -> Json<StatusResponse> {
    let _timer = LatencyTimer::new("delete_todo");
    let request = DeleteTodoRequest::from_body(&body);

    if state.store.remove(&username, request.todo_idx) {
        metrics::inc_todos_deleted();
    } else {
        debug!(todo_idx = request.todo_idx, "delete matched nothing");
        metrics::inc_delete_noops();
    }

    Json(StatusResponse::success())
}
