// Turns buffer state into chart-ready series

use serde::Serialize;
use uuid::Uuid;

use crate::core::buffer::RollingBuffer;
use crate::core::delta::deltas;
use crate::core::downsample::{downsample, window_filter};
use crate::core::error::Result;
use crate::core::format::{ChartSeries, GranularityOption, Sample};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    /// No sample has been accepted yet.
    Loading,
    Ready {
        session: Uuid,
        granularity: GranularityOption,
        lookback_hours: f64,
        latest: Sample,
        temperature: ChartSeries,
        delta: ChartSeries,
    },
}

impl DashboardView {
    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardView::Loading)
    }
}

/// Window, then bucket, then difference.
pub fn project(
    session: Uuid,
    buffer: &RollingBuffer,
    granularity: GranularityOption,
    now_ms: i64,
    lookback_hours: f64,
) -> Result<DashboardView> {
    let latest = match buffer.latest() {
        Some(sample) => *sample,
        None => return Ok(DashboardView::Loading),
    };

    let visible = window_filter(&buffer.snapshot(), now_ms, lookback_hours);

    let (temperature, delta) = if visible.is_empty() {
        (ChartSeries::default(), ChartSeries::default())
    } else {
        let points = downsample(&visible, granularity.bucket_size)?;
        let diffs = deltas(&points);
        (
            ChartSeries::from_aggregated(&points),
            ChartSeries::from_deltas(&diffs),
        )
    };

    Ok(DashboardView::Ready {
        session,
        granularity,
        lookback_hours,
        latest,
        temperature,
        delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::granularity::option_by_label;
    use std::sync::Arc;

    const T0: i64 = 1_700_000_000_000;

    fn filled(n: i64) -> RollingBuffer {
        let clock = Arc::new(ManualClock::new(T0));
        let mut buf = RollingBuffer::with_clock(10_000, 1000, clock.clone()).unwrap();
        for i in 0..n {
            buf.ingest(-42.0 - (i % 7) as f64 * 0.1, T0 + i * 1000);
            clock.advance(1000);
        }
        buf
    }

    #[test]
    fn test_empty_buffer_is_loading() {
        let buf = filled(0);
        let granularity = option_by_label("1s").unwrap();
        let view = project(Uuid::nil(), &buf, granularity, T0, 1.0).unwrap();
        assert!(view.is_loading());
        assert_eq!(serde_json::to_value(&view).unwrap()["status"], "loading");
    }

    #[test]
    fn test_ready_series_lengths() {
        let buf = filled(125);
        let now = T0 + 124 * 1000;
        let granularity = option_by_label("1m").unwrap();
        let view = project(Uuid::nil(), &buf, granularity, now, 1.0).unwrap();

        match view {
            DashboardView::Ready { temperature, delta, latest, .. } => {
                assert_eq!(temperature.len(), 3);
                assert_eq!(delta.len(), 3);
                assert_eq!(delta.values[0], 0.0);
                assert_eq!(latest.timestamp, now);
            }
            DashboardView::Loading => panic!("expected ready view"),
        }
    }

    #[test]
    fn test_window_excluding_everything_yields_empty_series() {
        let buf = filled(10);
        let far_future = T0 + 48 * 3_600_000;
        let granularity = option_by_label("10s").unwrap();
        let view = project(Uuid::nil(), &buf, granularity, far_future, 1.0).unwrap();

        match view {
            DashboardView::Ready { temperature, delta, latest, .. } => {
                assert!(temperature.is_empty());
                assert!(delta.is_empty());
                // last good value still reported
                assert_eq!(latest.timestamp, T0 + 9000);
            }
            DashboardView::Loading => panic!("expected ready view"),
        }
    }

    #[test]
    fn test_ready_serializes_chart_shape() {
        let buf = filled(3);
        let granularity = option_by_label("1s").unwrap();
        let view = project(Uuid::nil(), &buf, granularity, T0 + 2000, 1.0).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["temperature"]["values"].as_array().unwrap().len(), 3);
        assert_eq!(json["delta"]["labels"].as_array().unwrap().len(), 3);
        assert_eq!(json["granularity"]["bucketSize"], 1);
    }
}
