//! Tool catalogue, typed tool arguments, and the call dispatcher.
//!
//! The dispatcher upholds the failure-isolation contract: whatever goes
//! wrong inside a tool call, including gateway failures, the result is a
//! normal `CallToolResult` with `isError: true` and an `Error: `-prefixed
//! message. A bad tool call never escalates to a protocol error.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::warn;

use super::error::McpError;
use super::protocol::{CallToolResult, Content, Tool};
use super::resources::release_year;
use crate::tmdb::{MovieDb, MovieSummary, TimeWindow};

pub const SEARCH_MOVIES: &str = "search_movies";
pub const GET_RECOMMENDATIONS: &str = "get_recommendations";
pub const GET_TRENDING: &str = "get_trending";

/// The static three-entry tool catalogue. Identical on every call, in every
/// session.
pub fn tool_catalogue() -> Vec<Tool> {
    vec![
        Tool {
            name: SEARCH_MOVIES.to_string(),
            description: "Search for movies by title or keywords".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query for movies",
                    },
                },
                "required": ["query"],
            }),
        },
        Tool {
            name: GET_RECOMMENDATIONS.to_string(),
            description: "Get movie recommendations based on a movie ID".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "movieId": {
                        "type": "string",
                        "description": "TMDB movie ID to get recommendations for",
                    },
                },
                "required": ["movieId"],
            }),
        },
        Tool {
            name: GET_TRENDING.to_string(),
            description: "Get trending movies for a time window".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "timeWindow": {
                        "type": "string",
                        "enum": ["day", "week"],
                        "description": "Time window for trending movies",
                    },
                },
                "required": ["timeWindow"],
            }),
        },
    ]
}

#[derive(Debug, Deserialize)]
struct SearchMoviesParams {
    query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationsParams {
    movie_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendingParams {
    time_window: TimeWindow,
}

/// Invoke a tool by name. Never fails: errors are folded into the result
/// envelope.
pub async fn call_tool<G: MovieDb>(
    gateway: &G,
    name: &str,
    arguments: Option<Value>,
) -> CallToolResult {
    match dispatch_tool(gateway, name, arguments).await {
        Ok(text) => CallToolResult {
            content: vec![Content::text(text)],
            is_error: false,
        },
        Err(error) => {
            warn!(tool = name, %error, "tool call failed");
            CallToolResult {
                content: vec![Content::text(format!("Error: {error}"))],
                is_error: true,
            }
        }
    }
}

async fn dispatch_tool<G: MovieDb>(
    gateway: &G,
    name: &str,
    arguments: Option<Value>,
) -> Result<String, McpError> {
    let arguments = arguments.unwrap_or_else(|| Value::Object(serde_json::Map::new()));

    match name {
        SEARCH_MOVIES => {
            let params: SearchMoviesParams = tool_params(arguments)?;
            let page = gateway.search(&params.query).await?;
            Ok(format_search_results(&page.results))
        }
        GET_RECOMMENDATIONS => {
            let params: RecommendationsParams = tool_params(arguments)?;
            let page = gateway.recommendations(&params.movie_id).await?;
            Ok(format_recommendations(&page.results))
        }
        GET_TRENDING => {
            let params: TrendingParams = tool_params(arguments)?;
            let page = gateway.trending(params.time_window).await?;
            Ok(format_trending(&page.results, params.time_window))
        }
        _ => Err(McpError::ToolNotFound(name.to_string())),
    }
}

/// Validate tool arguments against the tool's declared shape.
fn tool_params<T: DeserializeOwned>(arguments: Value) -> Result<T, McpError> {
    serde_json::from_value(arguments).map_err(|e| McpError::InvalidParams(e.to_string()))
}

fn format_entry(movie: &MovieSummary, with_id: bool) -> String {
    let year = release_year(&movie.release_date);
    if with_id {
        format!(
            "{} ({}) - ID: {}\nRating: {}/10\nOverview: {}\n",
            movie.title, year, movie.id, movie.vote_average, movie.overview
        )
    } else {
        format!(
            "{} ({})\nRating: {}/10\nOverview: {}\n",
            movie.title, year, movie.vote_average, movie.overview
        )
    }
}

fn format_search_results(movies: &[MovieSummary]) -> String {
    let entries: Vec<String> = movies.iter().map(|m| format_entry(m, true)).collect();
    format!("Found {} movies:\n\n{}", movies.len(), entries.join("\n---\n"))
}

fn format_recommendations(movies: &[MovieSummary]) -> String {
    let entries: Vec<String> = movies
        .iter()
        .take(5)
        .map(|m| format_entry(m, false))
        .collect();
    format!("Top 5 recommendations:\n\n{}", entries.join("\n---\n"))
}

fn format_trending(movies: &[MovieSummary], window: TimeWindow) -> String {
    let entries: Vec<String> = movies
        .iter()
        .take(10)
        .map(|m| format_entry(m, false))
        .collect();
    format!(
        "Trending movies for the {}:\n\n{}",
        window,
        entries.join("\n---\n")
    )
}
