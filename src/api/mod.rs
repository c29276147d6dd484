//! HTTP API module for the todo endpoints.

pub mod handlers;
pub mod requests;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
