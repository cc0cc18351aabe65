// Periodic ingestion task

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::core::session::SharedSession;
use crate::core::source::SampleSource;

/// Owns the ingestion cadence. Dropping the handle aborts the task.
pub struct PollerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Signals the task and waits for it to exit.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("poller task ended abnormally: {}", e);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Spawns the single task that fetches and ingests every `period`.
///
/// The shared session is re-locked on every tick, so a session replaced by
/// reconfiguration is picked up on the next fetch.
pub fn spawn_poller<S: SampleSource>(
    source: Arc<S>,
    session: SharedSession,
    period: Duration,
) -> PollerHandle {
    let (tx, mut rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("Poller started, period={}ms", period.as_millis());

        loop {
            tokio::select! {
                _ = &mut rx => break,
                _ = ticker.tick() => {}
            }

            let reading = tokio::select! {
                _ = &mut rx => break,
                r = source.fetch_current() => r,
            };

            match reading {
                Ok(reading) => {
                    let accepted = session.write().await.ingest(reading);
                    debug!(
                        "Reading {:.3} at {} {}",
                        reading.value,
                        reading.timestamp,
                        if accepted { "accepted" } else { "suppressed" }
                    );
                }
                // next tick is the retry; buffer keeps its last good state
                Err(e) => warn!("Fetch failed, skipping tick: {}", e),
            }
        }

        info!("Poller stopped");
    });

    PollerHandle {
        shutdown: Some(tx),
        task: Some(task),
    }
}
