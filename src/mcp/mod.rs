//! Model Context Protocol (MCP) server core.
//!
//! Layout:
//!
//! - **protocol**: JSON-RPC 2.0 framing and MCP payload types
//! - **resources** / **tools**: the four request handlers
//! - **handlers**: the immutable method -> handler registration table
//! - **server**: `ProtocolServer`, one instance per transport binding
//! - **transport**: the duplex channel contract plus the stdio and
//!   per-session SSE implementations
//! - **session**: lifecycle of multiplexed SSE sessions

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod session;
pub mod tools;
pub mod transport;

#[cfg(test)]
mod handlers_test;
#[cfg(test)]
mod protocol_test;

pub use error::McpError;
pub use handlers::HandlerSet;
pub use server::ProtocolServer;
pub use session::{SessionEvent, SessionManager};
pub use transport::{StdioTransport, Transport, TransportError};
