//! Application state for the HTTP transport.

use std::sync::Arc;

use crate::mcp::SessionManager;

/// Shared application state.
///
/// Holds the session table behind an `Arc` so every handler observes the
/// same set of live SSE connections.
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    /// Get a cloned handle to the session table.
    pub fn sessions(&self) -> Arc<SessionManager> {
        Arc::clone(&self.sessions)
    }
}
