//! Bearer-token authorization gate.
//!
//! Every request passes through [`require_auth`] before routing. The check
//! itself sits behind [`Authorizer`] so the shared-secret comparison can be
//! swapped for something per-user without touching the handlers.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::ApiError;
use crate::metrics;

/// Decides whether a request's `Authorization` header is acceptable.
pub trait Authorizer: Send + Sync {
    /// `header` is `None` when the header is missing or not valid UTF-8.
    fn authorize(&self, header: Option<&str>) -> bool;
}

/// Accepts exactly `Bearer <key>` for one fixed key.
#[derive(Debug, Clone)]
pub struct StaticBearer {
    expected: Option<String>,
}

impl StaticBearer {
    /// With `key == None` nothing is ever accepted.
    pub fn new(key: Option<String>) -> Self {
        Self {
            expected: key.map(|k| format!("Bearer {k}")),
        }
    }
}

impl Authorizer for StaticBearer {
    fn authorize(&self, header: Option<&str>) -> bool {
        match (&self.expected, header) {
            (Some(expected), Some(header)) => header == expected,
            _ => false,
        }
    }
}

/// Middleware rejecting requests the authorizer does not accept.
pub async fn require_auth(
    State(authorizer): State<Arc<dyn Authorizer>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if !authorizer.authorize(header) {
        warn!(
            method = %request.method(),
            uri = %request.uri(),
            has_header = header.is_some(),
            "rejected unauthorized request"
        );
        metrics::inc_unauthorized();
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}
