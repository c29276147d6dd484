//! End-to-end tests for the todo API, driven through the full router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use todo_service::api::{create_router, AppState};
use todo_service::auth::{Authorizer, StaticBearer};
use todo_service::store::TodoStore;

const BEARER: &str = "Bearer integration-key";

struct TestApp {
    router: Router,
    store: TodoStore,
}

impl TestApp {
    fn new() -> Self {
        Self::with_authorizer(Arc::new(StaticBearer::new(Some(
            "integration-key".to_string(),
        ))))
    }

    fn with_authorizer(authorizer: Arc<dyn Authorizer>) -> Self {
        let store = TodoStore::new();
        let router = create_router(AppState::new(store.clone(), authorizer));
        Self { router, store }
    }

    async fn call(&self, method: Method, uri: &str, auth: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let body = if body.is_null() {
            Body::empty()
        } else {
            Body::from(body.to_string())
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn list(&self, user: &str) -> Value {
        let (status, body) = self
            .call(Method::GET, &format!("/todos/{user}"), Some(BEARER), Value::Null)
            .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    async fn add(&self, user: &str, body: Value) {
        let (status, resp) = self
            .call(Method::POST, &format!("/todos/{user}"), Some(BEARER), body)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp, json!({"status": "success"}));
    }

    async fn delete(&self, user: &str, body: Value) {
        let (status, resp) = self
            .call(Method::DELETE, &format!("/todos/{user}"), Some(BEARER), body)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp, json!({"status": "success"}));
    }
}

#[tokio::test]
async fn rejects_bad_authorization_without_touching_store() {
    let app = TestApp::new();

    for auth in [None, Some("integration-key"), Some("Bearer nope"), Some("Basic abc")] {
        for method in [Method::GET, Method::POST, Method::DELETE] {
            let (status, body) = app
                .call(method, "/todos/alice", auth, json!({"todo": "x", "todo_idx": 0}))
                .await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, json!({"error": "Unauthorized"}));
        }
    }

    assert_eq!(app.store.user_count(), 0);
}

#[tokio::test]
async fn missing_key_rejects_every_request() {
    let app = TestApp::with_authorizer(Arc::new(StaticBearer::new(None)));

    for auth in [None, Some("Bearer "), Some("Bearer None")] {
        let (status, _) = app
            .call(Method::GET, "/todos/alice", auth, Value::Null)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn never_seen_user_lists_empty() {
    let app = TestApp::new();
    assert_eq!(app.list("stranger").await, json!([]));
}

#[tokio::test]
async fn sequential_adds_keep_order() {
    let app = TestApp::new();
    app.add("alice", json!({"todo": "a"})).await;
    app.add("alice", json!({"todo": "b"})).await;

    assert_eq!(app.list("alice").await, json!(["a", "b"]));
}

#[tokio::test]
async fn delete_valid_index_shifts_rest() {
    let app = TestApp::new();
    for todo in ["a", "b", "c"] {
        app.add("alice", json!({ "todo": todo })).await;
    }

    app.delete("alice", json!({"todo_idx": 1})).await;

    assert_eq!(app.list("alice").await, json!(["a", "c"]));
}

#[tokio::test]
async fn delete_invalid_index_is_silent_noop() {
    let app = TestApp::new();
    for todo in ["a", "b", "c"] {
        app.add("alice", json!({ "todo": todo })).await;
    }

    app.delete("alice", json!({"todo_idx": -1})).await;
    app.delete("alice", json!({"todo_idx": 5})).await;
    app.delete("alice", json!({"todo_idx": 3})).await;
    app.delete("alice", json!({})).await;
    app.delete("nobody", json!({"todo_idx": 0})).await;

    assert_eq!(app.list("alice").await, json!(["a", "b", "c"]));
    assert_eq!(app.list("nobody").await, json!([]));
}

#[tokio::test]
async fn add_without_todo_field_appends_empty_string() {
    let app = TestApp::new();
    app.add("bob", json!({})).await;

    assert_eq!(app.list("bob").await, json!([""]));
}

#[tokio::test]
async fn malformed_add_body_is_absorbed() {
    let app = TestApp::new();
    app.add("bob", Value::Null).await;
    app.add("bob", json!(["not", "an", "object"])).await;
    app.add("bob", json!({"todo": 7})).await;

    assert_eq!(app.list("bob").await, json!(["", "", ""]));
}

#[tokio::test]
async fn repeated_list_is_stable() {
    let app = TestApp::new();
    app.add("u", json!({"todo": "x"})).await;

    let first = app.list("u").await;
    let second = app.list("u").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn usernames_are_taken_verbatim() {
    let app = TestApp::new();
    app.add("Alice", json!({"todo": "upper"})).await;
    app.add("alice", json!({"todo": "lower"})).await;

    assert_eq!(app.list("Alice").await, json!(["upper"]));
    assert_eq!(app.list("alice").await, json!(["lower"]));
}

#[tokio::test]
async fn concurrent_adds_all_land() {
    let app = Arc::new(TestApp::new());
    let mut handles = Vec::new();
    for i in 0..50 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            app.add("busy", json!({ "todo": format!("t{i}") })).await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let todos = app.list("busy").await;
    assert_eq!(todos.as_array().map(Vec::len), Some(50));
}
