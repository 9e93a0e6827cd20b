//! show_runtime - How long does it take to watch a whole TV show?
//!
//! This library resolves a show name against a TV metadata provider, fetches
//! the show's episodes and adds up their runtimes. A survey mode does the same
//! for a list of shows and reports the shortest and the longest one.

mod aggregator;
mod metadata_retrieval;
mod resolver;
mod survey;

pub use aggregator::{sum_runtimes, total_runtime};
pub use metadata_retrieval::{
    DEFAULT_BASE_URL, Episode, MetadataProvider, ShowCandidate, TvMazeProvider, UpstreamError,
};
pub use resolver::{pick_show_id, resolve};
pub use survey::{
    ShowFailure, ShowLength, SurveyError, SurveyReport, format_duration, format_show_length,
    read_show_list, survey_shows,
};

use thiserror::Error;

/// Process exit status for any failure talking to the metadata provider.
pub const EXIT_UPSTREAM_FAILURE: i32 = 10;

/// Process exit status for local failures such as an unreadable show list.
pub const EXIT_LOCAL_FAILURE: i32 = 1;

/// Progress event emitted while looking up shows
///
/// These events allow library users to track progress and provide feedback
/// during lookups.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Searching for the show
    Resolving { show_name: String },

    /// The show name was resolved to an id
    Resolved { show_name: String, show_id: u64 },

    /// Fetching the episode list
    FetchingEpisodes { show_id: u64 },

    /// Total runtime computed
    Totalled { show_id: u64, minutes: i64 },

    /// Survey moved on to the next show of the list
    SurveyingShow {
        index: usize,
        total: usize,
        show_name: String,
    },
}

/// Top-level error type for show_runtime operations
#[derive(Debug, Error)]
pub enum ShowRuntimeError {
    /// Error talking to the metadata provider
    #[error("{0}")]
    Upstream(#[from] UpstreamError),

    /// Error during a show list survey
    #[error("{0}")]
    Survey(#[from] SurveyError),
}

impl ShowRuntimeError {
    /// The process exit status this error should terminate with
    pub fn exit_code(&self) -> i32 {
        match self {
            ShowRuntimeError::Upstream(_) => EXIT_UPSTREAM_FAILURE,
            ShowRuntimeError::Survey(SurveyError::NoLengths) => EXIT_UPSTREAM_FAILURE,
            ShowRuntimeError::Survey(SurveyError::ReadFailed { .. }) => EXIT_LOCAL_FAILURE,
        }
    }
}

/// Removes every double quote character from a show name
///
/// Shells and wrapper scripts tend to pass names like `"The Wire"` with the
/// quotes still attached.
pub fn strip_quotes(show_name: &str) -> String {
    show_name.replace('"', "")
}

/// Computes the total runtime of a show in minutes
///
/// Resolves `show_name` to a show id, then sums the runtimes of all its
/// episodes. Exactly two requests are made, one after the other.
///
/// Progress events are emitted through the provided callback.
///
/// # Examples
///
/// ```no_run
/// use show_runtime::{show_runtime, TvMazeProvider};
///
/// let provider = TvMazeProvider::new();
/// let minutes = show_runtime(&provider, "Girls", |_| {}).unwrap();
/// println!("{}", minutes);
/// ```
pub fn show_runtime<P, F>(
    provider: &P,
    show_name: &str,
    mut progress_callback: F,
) -> Result<i64, UpstreamError>
where
    P: MetadataProvider + ?Sized,
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::Resolving {
        show_name: show_name.to_string(),
    });
    let show_id = resolve(provider, show_name)?;
    progress_callback(ProgressEvent::Resolved {
        show_name: show_name.to_string(),
        show_id,
    });

    progress_callback(ProgressEvent::FetchingEpisodes { show_id });
    let minutes = total_runtime(provider, show_id)?;
    progress_callback(ProgressEvent::Totalled { show_id, minutes });

    Ok(minutes)
}
