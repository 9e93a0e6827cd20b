//! Show name resolution
//!
//! Turns a free-text show name into a single show id. Search endpoints return
//! fuzzy suggestions, so only candidates whose name equals the query
//! (ignoring case) take part in disambiguation. Among those, the show that
//! ended most recently wins; shows without an end date rank last.

use crate::metadata_retrieval::{MetadataProvider, ShowCandidate, UpstreamError};
use chrono::NaiveDate;
use log::{debug, info};

/// An exact-name match with its end date resolved for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParsedCandidate {
    id: u64,
    ended: NaiveDate,
}

/// End date assumed for shows that have none recorded (0001-01-01).
///
/// Sorts before every real date.
const SENTINEL_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1, 1, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// Case-insensitive full string equality.
fn is_exact_match(candidate_name: &str, show_name: &str) -> bool {
    candidate_name.to_lowercase() == show_name.to_lowercase()
}

/// Picks the show id for `show_name` out of a list of search candidates.
///
/// Returns `None` only when `candidates` is empty. If no candidate matches
/// the name exactly, the first candidate is used. Among exact matches the
/// latest end date wins and ties go to the lowest id.
pub fn pick_show_id(candidates: &[ShowCandidate], show_name: &str) -> Option<u64> {
    let first = candidates.first()?;

    let best = candidates
        .iter()
        .filter(|candidate| is_exact_match(&candidate.name, show_name))
        .map(|candidate| ParsedCandidate {
            id: candidate.id,
            ended: candidate.ended.unwrap_or(SENTINEL_DATE),
        })
        .max_by(|a, b| a.ended.cmp(&b.ended).then_with(|| b.id.cmp(&a.id)));

    match best {
        Some(parsed) => {
            debug!(
                "Exact match for '{}': show {} (ended {})",
                show_name, parsed.id, parsed.ended
            );
            Some(parsed.id)
        }
        None => {
            debug!(
                "No exact match for '{}', falling back to first result '{}'",
                show_name, first.name
            );
            Some(first.id)
        }
    }
}

/// Resolves a show name to a show id using the given provider.
///
/// The caller is expected to have removed quote characters from the name.
///
/// # Errors
///
/// Returns an `UpstreamError` if the search fails or yields no candidates.
pub fn resolve<P>(provider: &P, show_name: &str) -> Result<u64, UpstreamError>
where
    P: MetadataProvider + ?Sized,
{
    let candidates = provider.search_shows(show_name)?;

    let show_id = pick_show_id(&candidates, show_name)
        .ok_or_else(|| UpstreamError::NoResults(show_name.to_string()))?;

    info!("Resolved '{}' to show {}", show_name, show_id);
    Ok(show_id)
}
