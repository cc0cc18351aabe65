// A single ingestion session: one buffer plus its granularity recommendation

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::core::buffer::RollingBuffer;
use crate::core::clock::Clock;
use crate::core::constants::{CATALOGUE, DEFAULT_CAPACITY, DEFAULT_MIN_INTERVAL_MS};
use crate::core::error::Result;
use crate::core::format::{GranularityOption, Reading, Sample};
use crate::core::granularity::{finest, recommend, threshold_for};
use crate::core::projection::{project, DashboardView};

/// Buffer sizing. Changing it means starting a new [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferProfile {
    pub capacity: usize,
    pub min_interval_ms: u64,
}

impl Default for BufferProfile {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
        }
    }
}

pub type SharedSession = Arc<RwLock<Session>>;

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    buffer: RollingBuffer,
    recommended: GranularityOption,
}

impl Session {
    pub fn new(profile: BufferProfile, clock: Arc<dyn Clock>) -> Result<Self> {
        let buffer =
            RollingBuffer::with_clock(profile.capacity, profile.min_interval_ms, clock)?;
        let id = Uuid::new_v4();

        info!(
            "Session {} started: capacity={}, min_interval_ms={}",
            id, profile.capacity, profile.min_interval_ms
        );

        Ok(Self {
            id,
            buffer,
            recommended: finest(),
        })
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn buffer(&self) -> &RollingBuffer {
        &self.buffer
    }

    pub fn profile(&self) -> BufferProfile {
        BufferProfile {
            capacity: self.buffer.capacity(),
            min_interval_ms: self.buffer.min_interval_ms(),
        }
    }

    pub fn recommended(&self) -> GranularityOption {
        self.recommended
    }

    pub fn ingest(&mut self, reading: Reading) -> bool {
        let accepted = self.buffer.ingest(reading.value, reading.timestamp);

        // re-evaluate only when the current recommendation is outgrown
        if accepted && self.buffer.len() > threshold_for(&self.recommended) {
            self.reevaluate();
        }

        accepted
    }

    /// Backfills reconstructed history and re-evaluates the recommendation.
    pub fn load_history(&mut self, samples: Vec<Sample>) -> usize {
        let added = self.buffer.backfill(samples);
        self.reevaluate();
        added
    }

    fn reevaluate(&mut self) {
        let next = recommend(self.buffer.len(), &CATALOGUE).unwrap_or_else(finest);
        if next != self.recommended {
            info!(
                "Recommended granularity {} -> {} at {} samples",
                self.recommended.label,
                next.label,
                self.buffer.len()
            );
            self.recommended = next;
        }
    }

    /// Falls back to the recommended granularity when none is given.
    pub fn view(
        &self,
        granularity: Option<GranularityOption>,
        lookback_hours: f64,
    ) -> Result<DashboardView> {
        let now = self.buffer.clock().now_ms();
        project(
            self.id,
            &self.buffer,
            granularity.unwrap_or(self.recommended),
            now,
            lookback_hours,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::error::SeriesError;
    use crate::core::format::HistoryOrder;
    use crate::core::source::reconstruct_history;

    const T0: i64 = 1_700_000_000_000;

    fn session(capacity: usize, interval: u64) -> (Session, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(T0));
        let profile = BufferProfile {
            capacity,
            min_interval_ms: interval,
        };
        (Session::new(profile, clock.clone()).unwrap(), clock)
    }

    #[test]
    fn test_invalid_profile() {
        let clock = Arc::new(ManualClock::new(T0));
        let profile = BufferProfile {
            capacity: 0,
            min_interval_ms: 1000,
        };
        assert!(matches!(Session::new(profile, clock), Err(SeriesError::Config(_))));
    }

    #[test]
    fn test_recommendation_moves_on_milestone() {
        let (mut s, clock) = session(10_000, 1000);
        for i in 0..720 {
            s.ingest(Reading { value: 1.0, timestamp: T0 + i * 1000 });
            clock.advance(1000);
        }
        assert_eq!(s.recommended().label, "1s");

        s.ingest(Reading { value: 1.0, timestamp: T0 + 720_000 });
        assert_eq!(s.recommended().label, "10s");
    }

    #[test]
    fn test_history_load_reevaluates() {
        let (mut s, _clock) = session(10_000, 1000);
        let samples: Vec<Sample> =
            (0..3600).map(|i| Sample::new(T0 + i * 1000, 0.0)).collect();
        assert_eq!(s.load_history(samples), 3600);
        assert_eq!(s.recommended().label, "10s");
        assert_eq!(s.buffer().len(), 3600);
    }

    #[test]
    fn test_history_after_live_ingest_keeps_live_tail() {
        let (mut s, clock) = session(100, 1000);
        for i in 0..5 {
            s.ingest(Reading { value: -42.0 + i as f64, timestamp: clock.now_ms() });
            clock.advance(1000);
        }

        let now = clock.now_ms();
        let history: Vec<f64> = vec![7.0; 10];
        let samples = reconstruct_history(&history, now, HistoryOrder::OldestFirst);
        assert_eq!(s.load_history(samples.clone()), 4);
        assert_eq!(s.load_history(samples), 0);

        let snap = s.buffer().snapshot();
        assert_eq!(snap.len(), 9);
        assert!(snap.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(s.buffer().latest().map(|l| (l.timestamp, l.value)), Some((T0 + 4000, -38.0)));
    }

    #[test]
    fn test_view_uses_recommended_by_default() {
        let (mut s, clock) = session(100, 0);
        assert!(s.view(None, 1.0).unwrap().is_loading());

        s.ingest(Reading { value: -42.5, timestamp: T0 });
        clock.advance(1000);
        match s.view(None, 1.0).unwrap() {
            DashboardView::Ready { granularity, session, .. } => {
                assert_eq!(granularity, finest());
                assert_eq!(session, s.id());
            }
            DashboardView::Loading => panic!("expected ready view"),
        }
    }

    #[test]
    fn test_profile_round_trip() {
        let (s, _clock) = session(42, 250);
        assert_eq!(
            s.profile(),
            BufferProfile {
                capacity: 42,
                min_interval_ms: 250
            }
        );
    }
}
