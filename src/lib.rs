pub mod api;
pub mod config;
pub mod mcp;
pub mod tmdb;
