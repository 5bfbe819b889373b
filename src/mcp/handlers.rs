//! Request-handler registration table.
//!
//! One handler per request kind, registered once at construction and
//! immutable afterwards. The table is shared by `Arc` across every protocol
//! server instance in the process, so per-connection servers on the
//! multiplexed transport reuse the same registrations instead of rebuilding
//! them.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::McpError;
use super::protocol::{
    CallToolParams, ListResourcesParams, ListToolsResult, ReadResourceParams, methods,
};
use super::{resources, tools};
use crate::tmdb::MovieDb;

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value, McpError>> + Send>>;

type HandlerFn = Box<dyn Fn(Option<Value>) -> HandlerFuture + Send + Sync>;

/// Immutable method-name -> handler table over a shared gateway.
pub struct HandlerSet {
    table: HashMap<&'static str, HandlerFn>,
}

impl HandlerSet {
    /// Register the four request handlers against the given gateway.
    pub fn new<G: MovieDb + 'static>(gateway: Arc<G>) -> Self {
        let mut table: HashMap<&'static str, HandlerFn> = HashMap::new();

        let gw = Arc::clone(&gateway);
        table.insert(
            methods::RESOURCES_LIST,
            Box::new(move |params| {
                let gw = Arc::clone(&gw);
                Box::pin(async move {
                    let params: ListResourcesParams = parse_params(params)?;
                    let result =
                        resources::list_resources(gw.as_ref(), params.cursor.as_deref()).await?;
                    Ok(serde_json::to_value(result)?)
                })
            }),
        );

        let gw = Arc::clone(&gateway);
        table.insert(
            methods::RESOURCES_READ,
            Box::new(move |params| {
                let gw = Arc::clone(&gw);
                Box::pin(async move {
                    let params: ReadResourceParams = parse_params(params)?;
                    let result = resources::read_resource(gw.as_ref(), &params.uri).await?;
                    Ok(serde_json::to_value(result)?)
                })
            }),
        );

        table.insert(
            methods::TOOLS_LIST,
            Box::new(|_params| {
                Box::pin(async {
                    Ok(serde_json::to_value(ListToolsResult {
                        tools: tools::tool_catalogue(),
                    })?)
                })
            }),
        );

        let gw = Arc::clone(&gateway);
        table.insert(
            methods::TOOLS_CALL,
            Box::new(move |params| {
                let gw = Arc::clone(&gw);
                Box::pin(async move {
                    let params: CallToolParams = parse_params(params)?;
                    let result =
                        tools::call_tool(gw.as_ref(), &params.name, params.arguments).await;
                    Ok(serde_json::to_value(result)?)
                })
            }),
        );

        Self { table }
    }

    /// Look up the handler for a method and start it on the given params.
    /// Returns `None` for methods with no registration.
    pub fn dispatch(&self, method: &str, params: Option<Value>) -> Option<HandlerFuture> {
        self.table.get(method).map(|handler| handler(params))
    }

    pub fn contains(&self, method: &str) -> bool {
        self.table.contains_key(method)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Decode request params; a missing params object is treated as empty.
fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, McpError> {
    let value = params.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
    serde_json::from_value(value).map_err(|e| McpError::InvalidParams(e.to_string()))
}
