//! SSE transport handlers.
//!
//! `GET /sse` opens a protocol session and streams its events; the client
//! sends frames back over `POST /messages/{id}`.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::Event;
use axum::response::{IntoResponse, Response, Sse};
use futures_util::stream;
use serde_json::json;
use tracing::{instrument, warn};

use super::super::state::AppState;
use crate::mcp::{SessionEvent, SessionManager};

/// Closes the session when the event stream is dropped, so a client that
/// disconnects mid-stream still releases its slot exactly once.
struct SessionGuard {
    sessions: Arc<SessionManager>,
    id: u64,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.sessions.close(self.id);
    }
}

fn to_sse_event(event: SessionEvent) -> Event {
    match event {
        SessionEvent::Connected { client } => Event::default()
            .event("connected")
            .data(json!({ "type": "connected", "client": client }).to_string()),
        SessionEvent::Ping => Event::default().data(json!({ "type": "ping" }).to_string()),
        SessionEvent::Message(frame) => Event::default().event("message").data(frame),
    }
}

/// Open an SSE session
#[instrument(skip(state))]
pub async fn sse(State(state): State<AppState>) -> Response {
    let sessions = state.sessions();
    let session = match sessions.open() {
        Ok(session) => session,
        Err(error) => {
            warn!("failed to open SSE session: {error}");
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
    };
    let guard = SessionGuard {
        sessions,
        id: session.id,
    };

    let stream = stream::unfold((session, guard), |(mut session, guard)| async move {
        let event = session.events.recv().await?;
        Some((
            Ok::<_, Infallible>(to_sse_event(event)),
            (session, guard),
        ))
    });

    Sse::new(stream).into_response()
}

/// Deliver a client frame to an open session
#[instrument(skip(state, frame))]
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    frame: String,
) -> StatusCode {
    match state.sessions().push(id, frame).await {
        Ok(()) => StatusCode::ACCEPTED,
        Err(error) => {
            warn!("dropping frame: {error}");
            StatusCode::NOT_FOUND
        }
    }
}
