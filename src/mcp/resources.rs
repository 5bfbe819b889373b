//! Resource handlers: paginated movie listing and single-movie reads.

use serde::Serialize;

use super::error::McpError;
use super::protocol::{ListResourcesResult, ReadResourceResult, Resource, ResourceContents};
use crate::tmdb::{MovieDb, MovieDetail, MovieSummary};

/// Scheme prefix for movie resource URIs.
pub const MOVIE_URI_PREFIX: &str = "tmdb:///movie/";

/// Image CDN base for poster URLs.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

const JSON_MIME: &str = "application/json";

/// List popular movies as resources, one upstream page per call.
///
/// The cursor is the next 1-based page number as decimal text. `next_cursor`
/// is present exactly when the upstream-reported page is below the upstream
/// total, and its value is that page plus one.
pub async fn list_resources<G: MovieDb>(
    gateway: &G,
    cursor: Option<&str>,
) -> Result<ListResourcesResult, McpError> {
    let page: u32 = match cursor {
        None => 1,
        Some(c) => c
            .parse()
            .map_err(|_| McpError::InvalidParams(format!("invalid cursor: {c:?}")))?,
    };

    let listing = gateway.popular(page).await?;

    let resources = listing.results.iter().map(movie_resource).collect();
    let next_cursor =
        (listing.page < listing.total_pages).then(|| (listing.page + 1).to_string());

    Ok(ListResourcesResult {
        resources,
        next_cursor,
    })
}

/// Read one movie resource by the URI handed out by `list_resources`.
///
/// A URI that does not carry the `tmdb:///movie/` prefix is rejected up
/// front instead of sending a garbage id upstream.
pub async fn read_resource<G: MovieDb>(
    gateway: &G,
    uri: &str,
) -> Result<ReadResourceResult, McpError> {
    let id = uri
        .strip_prefix(MOVIE_URI_PREFIX)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| McpError::InvalidUri(uri.to_string()))?;

    let detail = gateway.movie_detail(id).await?;
    let text = serde_json::to_string_pretty(&movie_document(&detail))?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContents {
            uri: uri.to_string(),
            mime_type: JSON_MIME.to_string(),
            text,
        }],
    })
}

fn movie_resource(movie: &MovieSummary) -> Resource {
    Resource {
        uri: format!("{MOVIE_URI_PREFIX}{}", movie.id),
        mime_type: JSON_MIME.to_string(),
        name: format!("{} ({})", movie.title, release_year(&movie.release_date)),
    }
}

/// Leading segment of a TMDB date (`2020-01-01` -> `2020`).
pub(crate) fn release_year(release_date: &str) -> &str {
    release_date
        .split('-')
        .next()
        .filter(|year| !year.is_empty())
        .unwrap_or("unknown")
}

/// Fixed-shape JSON document returned by `resources/read`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MovieDocument {
    title: String,
    release_date: String,
    rating: f64,
    overview: String,
    genres: String,
    poster_url: String,
    cast: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    director: Option<String>,
    reviews: Vec<ReviewEntry>,
}

#[derive(Debug, Serialize)]
struct ReviewEntry {
    author: String,
    content: String,
    rating: Option<f64>,
}

fn movie_document(detail: &MovieDetail) -> MovieDocument {
    let genres = detail
        .genres
        .iter()
        .map(|genre| genre.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let poster_url = match &detail.poster_path {
        Some(path) => format!("{POSTER_BASE_URL}{path}"),
        None => "No poster available".to_string(),
    };

    let cast = detail
        .credits
        .cast
        .iter()
        .take(5)
        .map(|member| format!("{} as {}", member.name, member.character))
        .collect();

    let director = detail
        .credits
        .crew
        .iter()
        .find(|member| member.job == "Director")
        .map(|member| member.name.clone());

    let reviews = detail
        .reviews
        .results
        .iter()
        .take(3)
        .map(|review| ReviewEntry {
            author: review.author.clone(),
            content: review.content.clone(),
            rating: review.author_details.rating,
        })
        .collect();

    MovieDocument {
        title: detail.title.clone(),
        release_date: detail.release_date.clone(),
        rating: detail.vote_average,
        overview: detail.overview.clone(),
        genres,
        poster_url,
        cast,
        director,
        reviews,
    }
}
