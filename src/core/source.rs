// Sample source abstraction and history reconstruction

use std::future::Future;

use crate::core::constants::MS_PER_SECOND;
use crate::core::error::FetchError;
use crate::core::format::{HistoryOrder, Reading, Sample};

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Where readings come from. Implementations must not block indefinitely.
pub trait SampleSource: Send + Sync + 'static {
    fn fetch_current(&self) -> impl Future<Output = FetchResult<Reading>> + Send;

    /// Values only; the payload carries no per-entry timestamps.
    fn fetch_history(
        &self,
        look_back_seconds: u64,
    ) -> impl Future<Output = FetchResult<Vec<f64>>> + Send;
}

/// Stamps a value-only history at uniform 1 s spacing, counted backward from
/// `fetched_at_ms`. The newest value gets `fetched_at_ms`. Output is oldest
/// first regardless of `order`.
pub fn reconstruct_history(
    values: &[f64],
    fetched_at_ms: i64,
    order: HistoryOrder,
) -> Vec<Sample> {
    let n = values.len() as i64;
    let stamp = |age: i64| fetched_at_ms - age * MS_PER_SECOND;

    match order {
        HistoryOrder::OldestFirst => values
            .iter()
            .enumerate()
            .map(|(i, v)| Sample::new(stamp(n - 1 - i as i64), *v))
            .collect(),
        HistoryOrder::NewestFirst => values
            .iter()
            .enumerate()
            .rev()
            .map(|(i, v)| Sample::new(stamp(i as i64), *v))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_first_reconstruction() {
        let samples = reconstruct_history(&[1.0, 2.0, 3.0], 10_000, HistoryOrder::OldestFirst);
        let stamps: Vec<i64> = samples.iter().map(|s| s.timestamp).collect();
        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
        assert_eq!(stamps, vec![8_000, 9_000, 10_000]);
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_newest_first_is_reversed() {
        let samples = reconstruct_history(&[3.0, 2.0, 1.0], 10_000, HistoryOrder::NewestFirst);
        let stamps: Vec<i64> = samples.iter().map(|s| s.timestamp).collect();
        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
        assert_eq!(stamps, vec![8_000, 9_000, 10_000]);
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_empty_history() {
        assert!(reconstruct_history(&[], 10_000, HistoryOrder::OldestFirst).is_empty());
    }
}
