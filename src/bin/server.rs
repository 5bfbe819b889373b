//! TMDB MCP server binary.
//!
//! Serves the movie-database protocol over two transports at once: stdio
//! (newline-delimited JSON-RPC) and HTTP with SSE sessions.

use std::net::IpAddr;
use std::sync::Arc;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use tmdb_mcp::api::{self, ApiError, AppState};
use tmdb_mcp::config::{Config, ConfigError};
use tmdb_mcp::mcp::{HandlerSet, ProtocolServer, SessionManager, StdioTransport};
use tmdb_mcp::tmdb::TmdbClient;
use tracing::{error, info};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("API server error: {0}")]
    #[diagnostic(code(tmdb_mcp::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "tmdb-mcp")]
#[command(author, version, about = "TMDB movie database MCP server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    api::init_tracing();
    let cli = Cli::parse();

    // Fail before any transport binds when the API key is absent.
    let config = Config::from_env()?.with_host(cli.host).with_port(cli.port);

    let gateway = Arc::new(TmdbClient::new(config.api_key.clone()));
    let handlers = Arc::new(HandlerSet::new(gateway));
    let sessions = Arc::new(SessionManager::new(Arc::clone(&handlers)));

    // Stdio transport runs alongside the HTTP listener.
    let stdio = ProtocolServer::new(handlers);
    tokio::spawn(async move {
        match stdio.connect(StdioTransport::new()).await {
            Ok(()) => info!("stdio transport closed"),
            Err(error) => {
                error!("stdio transport failed: {error}");
                std::process::exit(1);
            }
        }
    });

    api::run(&config, AppState::new(sessions)).await?;

    Ok(())
}
