//! HTTP request handlers.

mod sse;
mod system;

pub use sse::{post_message, sse};
pub use system::{StatusResponse, root, status};
