//! TMDB HTTP client.
//!
//! One outbound GET per call, no retries, no caching. The API key is
//! injected here so callers never handle the credential.

use serde_json::Value;
use tracing::debug;

use super::MovieDb;
use super::error::{TmdbError, TmdbResult};
use super::models::{MovieDetail, MoviePage, TimeWindow};

/// Production TMDB API base.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Thin client over the TMDB REST API.
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different base URL. Used by tests to target a
    /// local stand-in server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Issue one GET to `{base_url}{path}` with the API key plus the given
    /// query parameters, and decode the JSON body.
    pub async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> TmdbResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%path, "fetching from TMDB");

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TmdbError::Upstream {
                status: status.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_page(&self, path: &str, params: &[(&str, &str)]) -> TmdbResult<MoviePage> {
        let value = self.fetch(path, params).await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl MovieDb for TmdbClient {
    async fn popular(&self, page: u32) -> TmdbResult<MoviePage> {
        let page = page.to_string();
        self.fetch_page("/movie/popular", &[("page", page.as_str())])
            .await
    }

    async fn movie_detail(&self, id: &str) -> TmdbResult<MovieDetail> {
        // Cast, crew, and reviews in the same round trip.
        let value = self
            .fetch(
                &format!("/movie/{id}"),
                &[("append_to_response", "credits,reviews")],
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn search(&self, query: &str) -> TmdbResult<MoviePage> {
        self.fetch_page("/search/movie", &[("query", query)]).await
    }

    async fn recommendations(&self, movie_id: &str) -> TmdbResult<MoviePage> {
        self.fetch_page(&format!("/movie/{movie_id}/recommendations"), &[])
            .await
    }

    async fn trending(&self, window: TimeWindow) -> TmdbResult<MoviePage> {
        self.fetch_page(&format!("/trending/movie/{window}"), &[])
            .await
    }
}
