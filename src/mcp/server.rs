//! Protocol server: binds a handler set to one transport.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};

use super::handlers::HandlerSet;
use super::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION, RequestId, SERVER_NAME,
    ServerCapabilities, ServerInfo, error_codes, methods,
};
use super::transport::{Transport, TransportError};

/// Dispatches decoded requests to the shared handler table and writes
/// responses back to the transport it is bound to.
///
/// One instance serves exactly one transport binding. Instances are cheap:
/// every one of them shares the same `Arc`'d handler table, so the
/// multiplexed transport creates one per connection without re-registering
/// anything.
pub struct ProtocolServer {
    handlers: Arc<HandlerSet>,
}

impl ProtocolServer {
    pub fn new(handlers: Arc<HandlerSet>) -> Self {
        Self { handlers }
    }

    pub fn handlers(&self) -> &Arc<HandlerSet> {
        &self.handlers
    }

    /// Bind this server to `transport` for its lifetime.
    ///
    /// Requests are served one at a time, so responses leave in request
    /// order. A handler failure answers only the request that caused it;
    /// the binding ends on peer close (`Ok`) or a transport failure (`Err`).
    pub async fn connect<T: Transport>(self, mut transport: T) -> Result<(), TransportError> {
        loop {
            let frame = match transport.recv().await? {
                Some(frame) => frame,
                None => break,
            };

            let frame = frame.trim();
            if frame.is_empty() {
                continue;
            }

            let Some(response) = self.handle_frame(frame).await else {
                continue;
            };
            let encoded = serde_json::to_string(&response)?;
            transport.send(&encoded).await?;
        }

        transport.close().await;
        Ok(())
    }

    /// Decode one frame and produce its response, if any. Notifications
    /// (requests without an id) produce none.
    async fn handle_frame(&self, frame: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(frame) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    RequestId::Null,
                    error_codes::PARSE_ERROR,
                    format!("invalid JSON-RPC frame: {e}"),
                ));
            }
        };

        let Some(id) = request.id else {
            debug!(method = %request.method, "ignoring notification");
            return None;
        };

        Some(
            self.handle_request(id, &request.method, request.params)
                .await,
        )
    }

    async fn handle_request(
        &self,
        id: RequestId,
        method: &str,
        params: Option<Value>,
    ) -> JsonRpcResponse {
        debug!(%method, "dispatching request");

        match method {
            methods::INITIALIZE => match serde_json::to_value(initialize_result()) {
                Ok(value) => JsonRpcResponse::result(id, value),
                Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
            },
            methods::PING => JsonRpcResponse::result(id, json!({})),
            _ => match self.handlers.dispatch(method, params) {
                Some(handler) => match handler.await {
                    Ok(value) => JsonRpcResponse::result(id, value),
                    Err(error) => {
                        warn!(%method, %error, "request handler failed");
                        JsonRpcResponse::error(id, error.code(), error.to_string())
                    }
                },
                None => JsonRpcResponse::error(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("method not found: {method}"),
                ),
            },
        }
    }
}

fn initialize_result() -> InitializeResult {
    InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            resources: Some(json!({})),
            tools: Some(json!({})),
        },
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}
