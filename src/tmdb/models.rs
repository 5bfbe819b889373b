//! Upstream payload shapes.
//!
//! Decoding is deliberately lenient: TMDB omits fields like `release_date`
//! or `poster_path` on sparse records, and a single incomplete movie must
//! not fail a whole listing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One page of a movie listing (popular, search, recommendations, trending).
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

fn first_page() -> u32 {
    1
}

/// A movie as it appears in listing results.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
}

/// Full movie record, fetched with `append_to_response=credits,reviews`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub reviews: ReviewPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPage {
    #[serde(default)]
    pub results: Vec<Review>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_details: AuthorDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorDetails {
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Time window for the trending endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    Week,
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::Day => write!(f, "day"),
            TimeWindow::Week => write!(f, "week"),
        }
    }
}
