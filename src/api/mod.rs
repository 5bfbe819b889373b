//! HTTP transport: liveness endpoints plus the SSE session surface.

mod handlers;
mod routes;
mod state;


use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

pub use state::AppState;

#[derive(Debug, Error, Diagnostic)]
pub enum ApiError {
    #[error("failed to serve the HTTP transport: {0}")]
    #[diagnostic(code(tmdb_mcp::api::io))]
    Io(#[from] std::io::Error),
}

/// Initialize tracing subscriber with env filter.
///
/// Logs go to stderr: stdout belongs to the stdio protocol transport.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tmdb_mcp=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the HTTP transport with the given configuration.
pub async fn run(config: &Config, state: AppState) -> Result<(), ApiError> {
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP transport listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
