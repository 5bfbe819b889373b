//! Session manager for the multiplexed SSE transport.
//!
//! Each accepted connection gets its own protocol server and transport; the
//! manager owns the live-session table exclusively. Session ids grow
//! monotonically for the process lifetime and are never reused. Each open
//! session carries a keep-alive timer that must be cancelled exactly once at
//! close, or a recurring timer leaks per disconnected client.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::handlers::HandlerSet;
use super::server::ProtocolServer;
use super::transport::SseSessionTransport;

/// Period between keep-alive pings on an open session.
pub const KEEP_ALIVE_PERIOD: Duration = Duration::from_secs(30);

const EVENT_BUFFER: usize = 64;
const FRAME_BUFFER: usize = 16;

/// Events emitted on a session's outbound stream.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Handshake event, sent once when the session opens.
    Connected { client: u64 },
    /// Periodic keep-alive.
    Ping,
    /// A serialized JSON-RPC response frame.
    Message(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(u64),

    #[error("session handshake failed")]
    Handshake,
}

struct SessionHandle {
    inbound: mpsc::Sender<String>,
    keep_alive: CancellationToken,
}

/// A freshly opened session, handed to the HTTP layer: the id for the
/// message route and the event stream for the SSE response.
pub struct OpenSession {
    pub id: u64,
    pub events: mpsc::Receiver<SessionEvent>,
}

/// Owns the live-session table. All mutation happens in `open` and `close`.
pub struct SessionManager {
    sessions: DashMap<u64, SessionHandle>,
    next_id: AtomicU64,
    handlers: Arc<HandlerSet>,
    keep_alive_period: Duration,
}

impl SessionManager {
    pub fn new(handlers: Arc<HandlerSet>) -> Self {
        Self::with_keep_alive(handlers, KEEP_ALIVE_PERIOD)
    }

    /// Tests shorten the keep-alive period to observe pings.
    pub fn with_keep_alive(handlers: Arc<HandlerSet>, keep_alive_period: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            next_id: AtomicU64::new(0),
            handlers,
            keep_alive_period,
        }
    }

    /// Accept a connection: allocate an id, write the handshake event, and
    /// spawn the session's protocol server and keep-alive timer.
    pub fn open(self: &Arc<Self>) -> Result<OpenSession, SessionError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (frame_tx, frame_rx) = mpsc::channel(FRAME_BUFFER);

        // Handshake write; a session that cannot take it is never registered.
        event_tx
            .try_send(SessionEvent::Connected { client: id })
            .map_err(|_| SessionError::Handshake)?;

        let keep_alive = CancellationToken::new();

        let ping_tx = event_tx.clone();
        let ping_token = keep_alive.clone();
        let period = self.keep_alive_period;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // Swallow the immediate first tick; pings start one period in.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ping_token.cancelled() => break,
                    _ = ticker.tick() => {
                        if ping_tx.send(SessionEvent::Ping).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        let transport = SseSessionTransport::new(frame_rx, event_tx);
        let server = ProtocolServer::new(Arc::clone(&self.handlers));
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(error) = server.connect(transport).await {
                warn!(session = id, %error, "session transport failed");
            }
            manager.close(id);
        });

        self.sessions.insert(
            id,
            SessionHandle {
                inbound: frame_tx,
                keep_alive,
            },
        );
        info!(session = id, live = self.len(), "session opened");

        Ok(OpenSession {
            id,
            events: event_rx,
        })
    }

    /// Route one inbound frame to the session that owns it.
    pub async fn push(&self, id: u64, frame: String) -> Result<(), SessionError> {
        let inbound = self
            .sessions
            .get(&id)
            .map(|handle| handle.inbound.clone())
            .ok_or(SessionError::NotFound(id))?;

        inbound
            .send(frame)
            .await
            .map_err(|_| SessionError::NotFound(id))
    }

    /// Tear down a session. Idempotent: only the call that removes the
    /// handle cancels the keep-alive. Returns whether this call removed it.
    pub fn close(&self, id: u64) -> bool {
        match self.sessions.remove(&id) {
            Some((_, handle)) => {
                handle.keep_alive.cancel();
                debug!(session = id, live = self.len(), "session closed");
                true
            }
            None => false,
        }
    }

    /// Number of currently open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
