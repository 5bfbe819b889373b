//! Hand-written test double for the `MovieDb` trait, plus shared fixtures.

use super::error::{TmdbError, TmdbResult};
use super::models::{
    AuthorDetails, Credits, MovieDetail, MoviePage, MovieSummary, Review, ReviewPage, TimeWindow,
};
use super::MovieDb;

/// Stub gateway returning canned data, or failing every call.
pub(crate) struct StubMovieDb {
    pub page: MoviePage,
    pub detail: Option<MovieDetail>,
    pub fail: bool,
}

impl StubMovieDb {
    pub fn with_page(page: MoviePage) -> Self {
        Self {
            page,
            detail: None,
            fail: false,
        }
    }

    /// Single-page listing built from the given movies.
    pub fn with_movies(movies: Vec<MovieSummary>) -> Self {
        Self::with_page(MoviePage {
            page: 1,
            total_pages: 1,
            results: movies,
        })
    }

    pub fn with_detail(detail: MovieDetail) -> Self {
        Self {
            page: empty_page(),
            detail: Some(detail),
            fail: false,
        }
    }

    /// Every call reports an upstream failure.
    pub fn failing() -> Self {
        Self {
            page: empty_page(),
            detail: None,
            fail: true,
        }
    }

    fn page(&self) -> TmdbResult<MoviePage> {
        if self.fail {
            return Err(upstream_error());
        }
        Ok(self.page.clone())
    }
}

impl MovieDb for StubMovieDb {
    async fn popular(&self, _page: u32) -> TmdbResult<MoviePage> {
        self.page()
    }

    async fn movie_detail(&self, _id: &str) -> TmdbResult<MovieDetail> {
        if self.fail {
            return Err(upstream_error());
        }
        self.detail.clone().ok_or(TmdbError::Upstream {
            status: "404 Not Found".to_string(),
        })
    }

    async fn search(&self, _query: &str) -> TmdbResult<MoviePage> {
        self.page()
    }

    async fn recommendations(&self, _movie_id: &str) -> TmdbResult<MoviePage> {
        self.page()
    }

    async fn trending(&self, _window: TimeWindow) -> TmdbResult<MoviePage> {
        self.page()
    }
}

fn upstream_error() -> TmdbError {
    TmdbError::Upstream {
        status: "500 Internal Server Error".to_string(),
    }
}

pub(crate) fn empty_page() -> MoviePage {
    MoviePage {
        page: 1,
        total_pages: 1,
        results: Vec::new(),
    }
}

pub(crate) fn movie(id: u64, title: &str, release_date: &str, rating: f64, overview: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        release_date: release_date.to_string(),
        vote_average: rating,
        overview: overview.to_string(),
    }
}

/// The fixed two-item listing from the formatting fixtures.
pub(crate) fn two_movies() -> Vec<MovieSummary> {
    vec![
        movie(1, "A", "2020-01-01", 7.5, "o1"),
        movie(2, "B", "2021-06-15", 8.1, "o2"),
    ]
}

pub(crate) fn review(author: &str, content: &str, rating: Option<f64>) -> Review {
    Review {
        author: author.to_string(),
        content: content.to_string(),
        author_details: AuthorDetails { rating },
    }
}

pub(crate) fn detail_fixture() -> MovieDetail {
    use super::models::{CastMember, CrewMember, Genre};

    MovieDetail {
        id: 603,
        title: "The Matrix".to_string(),
        release_date: "1999-03-30".to_string(),
        vote_average: 8.2,
        overview: "A hacker learns the truth.".to_string(),
        genres: vec![
            Genre {
                name: "Action".to_string(),
            },
            Genre {
                name: "Science Fiction".to_string(),
            },
        ],
        poster_path: Some("/matrix.jpg".to_string()),
        credits: Credits {
            cast: vec![
                CastMember {
                    name: "Keanu Reeves".to_string(),
                    character: "Neo".to_string(),
                },
                CastMember {
                    name: "Laurence Fishburne".to_string(),
                    character: "Morpheus".to_string(),
                },
                CastMember {
                    name: "Carrie-Anne Moss".to_string(),
                    character: "Trinity".to_string(),
                },
                CastMember {
                    name: "Hugo Weaving".to_string(),
                    character: "Agent Smith".to_string(),
                },
                CastMember {
                    name: "Gloria Foster".to_string(),
                    character: "Oracle".to_string(),
                },
                CastMember {
                    name: "Joe Pantoliano".to_string(),
                    character: "Cypher".to_string(),
                },
            ],
            crew: vec![
                CrewMember {
                    name: "Joel Silver".to_string(),
                    job: "Producer".to_string(),
                },
                CrewMember {
                    name: "Lana Wachowski".to_string(),
                    job: "Director".to_string(),
                },
                CrewMember {
                    name: "Lilly Wachowski".to_string(),
                    job: "Director".to_string(),
                },
            ],
        },
        reviews: ReviewPage {
            results: vec![
                review("alice", "Great.", Some(9.0)),
                review("bob", "Good.", None),
                review("carol", "Fine.", Some(7.0)),
                review("dave", "Extra.", Some(5.0)),
            ],
        },
    }
}
