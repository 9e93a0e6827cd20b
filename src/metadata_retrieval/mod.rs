/// Data structures and traits for TV show metadata retrieval.
///
/// This module provides the records the resolver and aggregator work on
/// (show candidates and episodes), the error taxonomy for upstream failures,
/// and the trait that metadata providers implement.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::{DEFAULT_BASE_URL, TvMazeProvider};

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while talking to the metadata provider.
///
/// Every variant is fatal for a single show lookup. The CLI maps all of
/// them to the same exit status.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The HTTP request could not be performed
    #[error("Request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status code
    #[error("Fetching {what} from API failed with HTTP {status}")]
    Status { what: &'static str, status: String },

    /// Failed to parse the provider's JSON response
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// The search returned no candidates at all
    #[error("No matching shows found for '{0}'")]
    NoResults(String),

    /// The API returned data with the right shape but unusable content
    #[error("API returned invalid data: {0}")]
    InvalidData(String),
}

/// One show entry returned by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowCandidate {
    /// Provider specific show identifier
    pub id: u64,
    /// The show's display name
    pub name: String,
    /// The date the show ended, if it has ended
    pub ended: Option<NaiveDate>,
}

/// A single episode, reduced to what the aggregator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Episode {
    /// Episode duration in minutes, if the provider knows it
    pub runtime_minutes: Option<i64>,
}

/// Trait for metadata providers that can search shows and list episodes.
///
/// The resolver and aggregator only depend on this trait, so they can be
/// exercised against in-memory providers.
pub trait MetadataProvider {
    /// Searches for shows matching a free-text query.
    ///
    /// Returns the candidates in the order the provider ranked them.
    /// An empty list is returned as-is; deciding whether that is an error
    /// is up to the caller.
    fn search_shows(&self, query: &str) -> Result<Vec<ShowCandidate>, UpstreamError>;

    /// Fetches the full episode list of a show.
    fn fetch_episodes(&self, show_id: u64) -> Result<Vec<Episode>, UpstreamError>;
}
