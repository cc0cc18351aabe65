// Bounded, rate-limited store of raw samples

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{Result, SeriesError};
use crate::core::format::Sample;

/// Time-ordered FIFO buffer of accepted samples.
///
/// Writes are rate limited against the wall clock at ingestion time, not
/// against the sample's own timestamp, so redundant reads of a slow sensor
/// are dropped cheaply. Once `capacity` is reached the oldest sample is
/// evicted for every new one.
pub struct RollingBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
    min_interval_ms: u64,
    last_accepted_at: Option<i64>,
    clock: Arc<dyn Clock>,
}

impl RollingBuffer {
    pub fn new(capacity: usize, min_interval_ms: u64) -> Result<Self> {
        Self::with_clock(capacity, min_interval_ms, Arc::new(SystemClock))
    }

    pub fn with_clock(
        capacity: usize,
        min_interval_ms: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(SeriesError::Config(
                "buffer capacity must be positive".to_string(),
            ));
        }
        if min_interval_ms > i64::MAX as u64 {
            return Err(SeriesError::Config(format!(
                "minimum interval out of range: {}",
                min_interval_ms
            )));
        }

        Ok(Self {
            samples: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
            min_interval_ms,
            last_accepted_at: None,
            clock,
        })
    }

    /// Returns `false` when the call lands inside the minimum interval.
    pub fn ingest(&mut self, value: f64, timestamp: i64) -> bool {
        let now = self.clock.now_ms();

        if let Some(last) = self.last_accepted_at {
            // a clock stepping backwards re-arms the limiter instead of stalling it
            if now >= last && now - last < self.min_interval_ms as i64 {
                debug!("sample suppressed: {}ms since last accept", now - last);
                return false;
            }
        }

        self.last_accepted_at = Some(now);
        self.push(Sample::new(timestamp, value));
        true
    }

    /// Merges reconstructed history (oldest first) in front of the retained
    /// samples. Only history strictly older than the oldest retained sample
    /// is kept, and when space runs out the oldest history is dropped so the
    /// live tail is never evicted. Bypasses the rate limiter and leaves the
    /// last-accepted instant untouched.
    pub fn backfill<I>(&mut self, samples: I) -> usize
    where
        I: IntoIterator<Item = Sample>,
    {
        let oldest = self.samples.front().map(|s| s.timestamp);
        let older: Vec<Sample> = samples
            .into_iter()
            .filter(|s| oldest.map_or(true, |o| s.timestamp < o))
            .collect();

        let room = self.capacity - self.samples.len();
        let skip = older.len().saturating_sub(room);

        for sample in older[skip..].iter().rev() {
            self.samples.push_front(*sample);
        }

        older.len() - skip
    }

    fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    pub fn filter_since(&self, cutoff_ms: i64) -> Vec<Sample> {
        self.samples
            .iter()
            .filter(|s| s.timestamp >= cutoff_ms)
            .copied()
            .collect()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

impl fmt::Debug for RollingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollingBuffer")
            .field("len", &self.samples.len())
            .field("capacity", &self.capacity)
            .field("min_interval_ms", &self.min_interval_ms)
            .field("last_accepted_at", &self.last_accepted_at)
            .finish()
    }
}
