// Data structures for samples and derived series

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::core::constants::LABEL_FORMAT;

/// One raw reading as retained by the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: i64, // epoch milliseconds
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Mean of one contiguous chunk of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregatedPoint {
    pub timestamp: f64,
    pub value: f64,
}

impl From<&Sample> for AggregatedPoint {
    fn from(sample: &Sample) -> Self {
        Self {
            timestamp: sample.timestamp as f64,
            value: sample.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeltaPoint {
    pub timestamp: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GranularityOption {
    pub label: &'static str,
    #[serde(rename = "bucketSize")]
    pub bucket_size: usize,
}

impl GranularityOption {
    pub const fn new(label: &'static str, bucket_size: usize) -> Self {
        Self { label, bucket_size }
    }
}

/// Result of a single `fetch_current` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub timestamp: i64,
}

/// Ordering of a value-only history payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryOrder {
    #[default]
    OldestFirst,
    NewestFirst,
}

/// Prepared series handed to the chart surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn from_aggregated(points: &[AggregatedPoint]) -> Self {
        Self {
            labels: points.iter().map(|p| time_label(p.timestamp)).collect(),
            values: points.iter().map(|p| p.value).collect(),
        }
    }

    pub fn from_deltas(points: &[DeltaPoint]) -> Self {
        Self {
            labels: points.iter().map(|p| time_label(p.timestamp)).collect(),
            values: points.iter().map(|p| p.delta).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Human-readable local time for a (possibly fractional) epoch-ms timestamp.
pub fn time_label(timestamp_ms: f64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms.round() as i64).single() {
        Some(dt) => dt.format(LABEL_FORMAT).to_string(),
        None => String::new(),
    }
}
