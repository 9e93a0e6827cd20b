/// TVMaze metadata provider implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchResult, TvMazeShow};
use super::{Episode, MetadataProvider, ShowCandidate, UpstreamError};
use chrono::NaiveDate;
use log::debug;
use reqwest::blocking::Response;

/// Base URL of the public TVMaze API.
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Metadata provider for the TVMaze API.
///
/// This provider uses the `/search/shows` endpoint to find candidates and
/// `/shows/{id}/episodes` to list episodes. The base URL is configurable so
/// the provider can be pointed at a local server.
pub struct TvMazeProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TvMazeProvider {
    /// Creates a new TVMaze provider talking to the public API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a provider talking to the given base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::blocking::Client::new(),
            base_url,
        }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Converts a TVMaze show to a search candidate, parsing its end date.
    fn convert_show(tvmaze_show: TvMazeShow) -> Result<ShowCandidate, UpstreamError> {
        let ended = tvmaze_show
            .ended
            .as_deref()
            .map(|ended| {
                NaiveDate::parse_from_str(ended, "%Y-%m-%d").map_err(|e| {
                    UpstreamError::InvalidData(format!(
                        "show {} has malformed end date '{}': {}",
                        tvmaze_show.id, ended, e
                    ))
                })
            })
            .transpose()?;

        Ok(ShowCandidate {
            id: tvmaze_show.id,
            name: tvmaze_show.name,
            ended,
        })
    }

    /// Sends a GET request and ensures the response is a success.
    fn get(
        &self,
        what: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Response, UpstreamError> {
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                what,
                status: format!(
                    "{} {}",
                    response.status().as_u16(),
                    response.status().canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        Ok(response)
    }
}

impl Default for TvMazeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataProvider for TvMazeProvider {
    fn search_shows(&self, query: &str) -> Result<Vec<ShowCandidate>, UpstreamError> {
        let url = format!("{}/search/shows", self.base_url);
        let response = self.get("shows data", &url, &[("q", query)])?;

        let results: Vec<TvMazeSearchResult> = response
            .json()
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        debug!("Search for '{}' returned {} result(s)", query, results.len());

        results
            .into_iter()
            .map(|result| Self::convert_show(result.show))
            .collect()
    }

    fn fetch_episodes(&self, show_id: u64) -> Result<Vec<Episode>, UpstreamError> {
        let url = format!("{}/shows/{}/episodes", self.base_url, show_id);
        let response = self.get("episodes data", &url, &[])?;

        let episodes: Vec<TvMazeEpisode> = response
            .json()
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        debug!("Show {} has {} episode(s)", show_id, episodes.len());

        Ok(episodes
            .into_iter()
            .map(|episode| Episode {
                runtime_minutes: episode.runtime,
            })
            .collect())
    }
}
