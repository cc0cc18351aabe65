// Look-back windowing and chunk-mean downsampling

use crate::core::constants::MS_PER_HOUR;
use crate::core::error::{Result, SeriesError};
use crate::core::format::{AggregatedPoint, Sample};

/// Keeps samples with `timestamp >= now_ms - look_back_hours * 1h`.
///
/// Must run before [`downsample`]: bucket boundaries are anchored to the
/// oldest sample of the visible window.
pub fn window_filter(samples: &[Sample], now_ms: i64, look_back_hours: f64) -> Vec<Sample> {
    let cutoff = now_ms as f64 - look_back_hours * MS_PER_HOUR;
    samples
        .iter()
        .filter(|s| s.timestamp as f64 >= cutoff)
        .copied()
        .collect()
}

/// Splits `samples` left to right into chunks of `bucket_size` and emits the
/// mean timestamp and mean value of each. A trailing partial chunk becomes
/// its own point.
pub fn downsample(samples: &[Sample], bucket_size: usize) -> Result<Vec<AggregatedPoint>> {
    if bucket_size == 0 {
        return Err(SeriesError::Config("bucket size must be at least 1".to_string()));
    }
    if samples.is_empty() {
        return Err(SeriesError::EmptyInput);
    }

    if bucket_size == 1 {
        return Ok(samples.iter().map(AggregatedPoint::from).collect());
    }

    Ok(samples.chunks(bucket_size).map(chunk_mean).collect())
}

fn chunk_mean(chunk: &[Sample]) -> AggregatedPoint {
    let n = chunk.len() as f64;
    let (ts_sum, value_sum) = chunk
        .iter()
        .fold((0.0, 0.0), |(ts, v), s| (ts + s.timestamp as f64, v + s.value));

    AggregatedPoint {
        timestamp: ts_sum / n,
        value: value_sum / n,
    }
}
