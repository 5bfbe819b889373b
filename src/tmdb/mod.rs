//! TMDB data provider gateway.
//!
//! `TmdbClient` is the production implementation; protocol handlers depend
//! on the `MovieDb` trait instead of the concrete client so tests can
//! substitute a stub (no dynamic dispatch, same pattern as the rest of the
//! crate: generic over the trait).

mod client;
mod error;
mod models;

#[cfg(test)]
pub(crate) mod stub;

use std::future::Future;

pub use client::{DEFAULT_BASE_URL, TmdbClient};
pub use error::{TmdbError, TmdbResult};
pub use models::{
    AuthorDetails, CastMember, Credits, CrewMember, Genre, MovieDetail, MoviePage, MovieSummary,
    Review, ReviewPage, TimeWindow,
};

/// Read-only movie database operations the protocol handlers need.
///
/// Every method performs exactly one upstream query.
pub trait MovieDb: Send + Sync {
    /// Popular movies, one 1-based page at a time.
    fn popular(&self, page: u32) -> impl Future<Output = TmdbResult<MoviePage>> + Send;

    /// Full record for one movie, including cast, crew, and reviews.
    fn movie_detail(&self, id: &str) -> impl Future<Output = TmdbResult<MovieDetail>> + Send;

    /// Title search.
    fn search(&self, query: &str) -> impl Future<Output = TmdbResult<MoviePage>> + Send;

    /// Recommendations derived from one movie.
    fn recommendations(&self, movie_id: &str)
    -> impl Future<Output = TmdbResult<MoviePage>> + Send;

    /// Trending movies for a day or week window.
    fn trending(&self, window: TimeWindow) -> impl Future<Output = TmdbResult<MoviePage>> + Send;
}
