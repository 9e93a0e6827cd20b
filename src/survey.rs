//! Show list survey
//!
//! Runs the runtime lookup for every show in a list and reports which
//! show is the shortest and which is the longest. Lookups happen one after
//! another; a show that cannot be looked up is recorded and skipped.

use crate::metadata_retrieval::{MetadataProvider, UpstreamError};
use crate::{ProgressEvent, show_runtime};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while surveying a show list
#[derive(Debug, Error)]
pub enum SurveyError {
    /// Failed to read the show list file
    #[error("Failed to read show list {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Not a single show in the list could be looked up
    #[error("Could not determine the length of any show")]
    NoLengths,
}

/// Total runtime of one show from the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowLength {
    /// The show name as given in the list
    pub show_name: String,
    /// Total runtime in minutes
    pub minutes: i64,
}

/// A show whose lookup failed
#[derive(Debug)]
pub struct ShowFailure {
    /// The show name as given in the list
    pub show_name: String,
    /// Why the lookup failed
    pub error: UpstreamError,
}

/// Outcome of surveying a list of shows
#[derive(Debug, Default)]
pub struct SurveyReport {
    /// Successfully measured shows, in list order
    pub lengths: Vec<ShowLength>,
    /// Shows that could not be measured, in list order
    pub failures: Vec<ShowFailure>,
}

impl SurveyReport {
    /// The first show with the smallest runtime
    pub fn shortest(&self) -> Option<&ShowLength> {
        self.lengths
            .iter()
            .reduce(|best, length| if length.minutes < best.minutes { length } else { best })
    }

    /// The last show with the largest runtime
    pub fn longest(&self) -> Option<&ShowLength> {
        self.lengths
            .iter()
            .reduce(|best, length| if length.minutes >= best.minutes { length } else { best })
    }

    /// Returns the shortest and longest show, or an error if there are none
    pub fn extremes(&self) -> Result<(&ShowLength, &ShowLength), SurveyError> {
        match (self.shortest(), self.longest()) {
            (Some(shortest), Some(longest)) => Ok((shortest, longest)),
            _ => Err(SurveyError::NoLengths),
        }
    }
}

/// Reads a show list file with one show name per line
///
/// Surrounding whitespace is trimmed and blank lines are skipped.
pub fn read_show_list(path: &Path) -> Result<Vec<String>, SurveyError> {
    let content = fs::read_to_string(path).map_err(|e| SurveyError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Looks up the total runtime of every show in `shows`
///
/// Failed lookups end up in [`SurveyReport::failures`]; they never abort the
/// survey.
pub fn survey_shows<P, F>(provider: &P, shows: &[String], mut progress_callback: F) -> SurveyReport
where
    P: MetadataProvider + ?Sized,
    F: FnMut(ProgressEvent),
{
    let mut report = SurveyReport::default();

    for (index, show_name) in shows.iter().enumerate() {
        progress_callback(ProgressEvent::SurveyingShow {
            index,
            total: shows.len(),
            show_name: show_name.clone(),
        });

        match show_runtime(provider, show_name, &mut progress_callback) {
            Ok(minutes) => report.lengths.push(ShowLength {
                show_name: show_name.clone(),
                minutes,
            }),
            Err(error) => report.failures.push(ShowFailure {
                show_name: show_name.clone(),
                error,
            }),
        }
    }

    report
}

/// Formats a number of minutes as `{hours}h {minutes}m`
pub fn format_duration(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Formats a show length as `{show} ({hours}h {minutes}m)`
pub fn format_show_length(length: &ShowLength) -> String {
    format!("{} ({})", length.show_name, format_duration(length.minutes))
}
