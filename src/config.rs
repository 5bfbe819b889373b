//! Server configuration.
//!
//! The TMDB credential comes from the environment and is required; the
//! process must refuse to start without it, before any transport binds.
//! Host and port come from CLI flags and override the defaults here.

use std::env;
use std::net::IpAddr;

use miette::Diagnostic;
use thiserror::Error;

/// Environment variable holding the TMDB API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("{API_KEY_ENV} environment variable is not set")]
    #[diagnostic(
        code(tmdb_mcp::config::missing_api_key),
        help(
            "Get an API key at https://www.themoviedb.org/settings/api and export TMDB_API_KEY before starting the server."
        )
    )]
    MissingApiKey,
}

/// Runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct Config {
    /// TMDB API key, injected into every upstream request.
    pub api_key: String,
    /// Host address the HTTP server binds to.
    pub host: IpAddr,
    /// Port the HTTP server listens on.
    pub port: u16,
}

impl Config {
    /// Build a configuration from the environment.
    ///
    /// Fails when `TMDB_API_KEY` is absent or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            host: "0.0.0.0".parse().unwrap(),
            port: 3000,
        })
    }

    /// Override the bind host (CLI flag takes precedence over the default).
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Override the listen port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
