//! Runtime aggregation
//!
//! Sums the runtime of every episode of a show.

use crate::metadata_retrieval::{Episode, MetadataProvider, UpstreamError};
use log::info;

/// Sums episode runtimes, counting missing runtimes as zero.
///
/// Values are passed through unchecked, negative runtimes included.
pub fn sum_runtimes(episodes: &[Episode]) -> i64 {
    episodes
        .iter()
        .map(|episode| episode.runtime_minutes.unwrap_or(0))
        .sum()
}

/// Fetches all episodes of a show and returns their total runtime in minutes.
///
/// A show without episodes has a total runtime of zero.
pub fn total_runtime<P>(provider: &P, show_id: u64) -> Result<i64, UpstreamError>
where
    P: MetadataProvider + ?Sized,
{
    let episodes = provider.fetch_episodes(show_id)?;
    let total = sum_runtimes(&episodes);

    info!(
        "Show {} has {} episode(s) totalling {} minute(s)",
        show_id,
        episodes.len(),
        total
    );
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata_retrieval::ShowCandidate;

    fn episodes(runtimes: &[Option<i64>]) -> Vec<Episode> {
        runtimes
            .iter()
            .map(|&runtime_minutes| Episode { runtime_minutes })
            .collect()
    }

    struct FixedEpisodes(Option<Vec<Episode>>);

    impl MetadataProvider for FixedEpisodes {
        fn search_shows(&self, _query: &str) -> Result<Vec<ShowCandidate>, UpstreamError> {
            unreachable!("aggregator never searches")
        }

        fn fetch_episodes(&self, _show_id: u64) -> Result<Vec<Episode>, UpstreamError> {
            self.0
                .clone()
                .ok_or_else(|| UpstreamError::Parse("expected value at line 1".to_string()))
        }
    }

    #[test]
    fn test_null_runtime_counts_as_zero() {
        assert_eq!(sum_runtimes(&episodes(&[Some(30), None, Some(45)])), 75);
    }

    #[test]
    fn test_empty_episode_list_is_zero() {
        assert_eq!(sum_runtimes(&[]), 0);
        assert_eq!(total_runtime(&FixedEpisodes(Some(Vec::new())), 1).unwrap(), 0);
    }

    #[test]
    fn test_negative_runtimes_pass_through() {
        assert_eq!(sum_runtimes(&episodes(&[Some(60), Some(-10)])), 50);
    }

    #[test]
    fn test_total_runtime_propagates_errors() {
        let result = total_runtime(&FixedEpisodes(None), 42);
        assert!(matches!(result, Err(UpstreamError::Parse(_))));
    }

    #[test]
    fn test_total_runtime_sums_fetched_episodes() {
        let provider = FixedEpisodes(Some(episodes(&[Some(22), Some(22), None, Some(44)])));
        assert_eq!(total_runtime(&provider, 139).unwrap(), 88);
    }
}
