//! In-memory todo storage keyed by username.
//!
//! Each username maps to an ordered list of todo strings. Todos have no
//! identity beyond their position, so deletion is index-addressed and
//! insertion order must survive every operation except the removal itself.
//!
//! The map is sharded ([`DashMap`]); every operation holds the shard lock for
//! its whole read-modify-write, so concurrent requests on the same user never
//! interleave inside an add or a remove.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

/// Shared handle to the process-wide todo map.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    todos: Arc<DashMap<String, Vec<String>>>,
}

impl TodoStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Todos for `username` in insertion order. Unknown users have none.
    pub fn list(&self, username: &str) -> Vec<String> {
        self.todos
            .get(username)
            .map(|todos| todos.clone())
            .unwrap_or_default()
    }

    /// Append `todo` to the end of the user's list, creating it if needed.
    pub fn add(&self, username: &str, todo: String) {
        let mut todos = self.todos.entry(username.to_string()).or_default();
        todos.push(todo);
        debug!(username, len = todos.len(), "todo appended");
    }

    /// Remove the todo at `idx`, shifting later entries left.
    ///
    /// Negative or out-of-range indices, and unknown users, are a no-op.
    /// Returns whether an element was removed.
    pub fn remove(&self, username: &str, idx: i64) -> bool {
        let Some(mut todos) = self.todos.get_mut(username) else {
            return false;
        };

        let Ok(idx) = usize::try_from(idx) else {
            return false;
        };

        if idx >= todos.len() {
            return false;
        }

        todos.remove(idx);
        debug!(username, idx, len = todos.len(), "todo removed");
        true
    }

    /// Number of users that have ever had a todo added.
    pub fn user_count(&self) -> usize {
        self.todos.len()
    }
}
