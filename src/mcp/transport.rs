//! Transport abstraction: a duplex, framed message channel.
//!
//! Two implementations share the contract: the process-wide stdio channel
//! (one peer for the process lifetime) and a per-connection channel backing
//! one SSE session. Frames are single-line JSON.

use std::future::Future;

use thiserror::Error;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use tokio::sync::mpsc;

use super::session::SessionEvent;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport closed")]
    Closed,

    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A duplex message channel bound to exactly one peer.
pub trait Transport: Send {
    /// Next inbound frame; `None` means the peer closed the channel.
    fn recv(&mut self) -> impl Future<Output = Result<Option<String>, TransportError>> + Send;

    /// Write one outbound frame.
    fn send(&mut self, frame: &str) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Release the channel. No frames are delivered afterwards.
    fn close(&mut self) -> impl Future<Output = ()> + Send;
}

/// Transport over the process's stdin/stdout, one frame per line.
///
/// stdout belongs to this transport exclusively; logging goes to stderr.
pub struct StdioTransport {
    reader: Lines<BufReader<Stdin>>,
    writer: Stdout,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(io::stdin()).lines(),
            writer: io::stdout(),
        }
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for StdioTransport {
    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        Ok(self.reader.next_line().await?)
    }

    async fn send(&mut self, frame: &str) -> Result<(), TransportError> {
        self.writer.write_all(frame.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn close(&mut self) {
        let _ = self.writer.flush().await;
    }
}

/// Transport bound to one SSE session.
///
/// Outbound frames feed that client's event stream only; inbound frames
/// arrive from that session's message route only.
pub struct SseSessionTransport {
    inbound: mpsc::Receiver<String>,
    outbound: mpsc::Sender<SessionEvent>,
}

impl SseSessionTransport {
    pub(crate) fn new(inbound: mpsc::Receiver<String>, outbound: mpsc::Sender<SessionEvent>) -> Self {
        Self { inbound, outbound }
    }
}

impl Transport for SseSessionTransport {
    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        Ok(self.inbound.recv().await)
    }

    async fn send(&mut self, frame: &str) -> Result<(), TransportError> {
        self.outbound
            .send(SessionEvent::Message(frame.to_owned()))
            .await
            .map_err(|_| TransportError::Closed)
    }

    async fn close(&mut self) {
        self.inbound.close();
    }
}
