//! Per-user todo list HTTP service.
//!
//! Three operations on `/todos/{username}`: list (`GET`), add (`POST`) and
//! delete by index (`DELETE`). State lives in process memory only. Every
//! request must carry `Authorization: Bearer <SERVICE_AUTH_KEY>`.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`auth`]: Authorization gate
//! - [`store`]: In-memory todo storage
//! - [`api`]: HTTP handlers and router
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError};
