//! System liveness and status handlers.

use axum::Json;
use serde::Serialize;
use tracing::instrument;

use crate::mcp::protocol::SERVER_NAME;

/// Status response describing the running server.
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub server_name: String,
    pub version: String,
    pub endpoints: Vec<String>,
    pub features: Vec<String>,
}

/// Liveness endpoint
#[instrument]
pub async fn root() -> &'static str {
    "TMDB MCP server is running"
}

/// Status endpoint
///
/// Returns the server identity together with the routes and protocol
/// capabilities it exposes.
#[instrument]
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        server_name: SERVER_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ["/", "/status", "/sse", "/messages/{id}"]
            .map(String::from)
            .to_vec(),
        features: ["resources", "tools"].map(String::from).to_vec(),
    })
}
