/// TVMaze API response types for deserialization.
///
/// These structures mirror the parts of the TVMaze JSON responses we read.
/// All other fields are ignored by serde.
use serde::Deserialize;

/// One entry of the `/search/shows` response.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeSearchResult {
    /// The matched show
    pub show: TvMazeShow,
}

/// Show record embedded in a search result.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    /// TVMaze show id
    pub id: u64,
    /// The name of the TV show
    pub name: String,
    /// End date as `YYYY-MM-DD` (null while the show is running)
    #[serde(default)]
    pub ended: Option<String>,
}

/// A single episode from the `/shows/{id}/episodes` response.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    /// Runtime in minutes (may be null)
    #[serde(default)]
    pub runtime: Option<i64>,
}
