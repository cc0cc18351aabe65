pub mod http_source;
pub mod simulated;

use std::time::Duration;

use tseries::{FetchResult, Reading, SampleSource};

use crate::models::dashboard_model::{SourceConfig, SourceKind};
use http_source::HttpSampleSource;
use simulated::SimulatedSource;

/// The source chosen by configuration.
pub enum AnySource {
    Http(HttpSampleSource),
    Simulated(SimulatedSource),
}

impl AnySource {
    pub fn from_config(config: &SourceConfig) -> FetchResult<Self> {
        Ok(match config.kind {
            SourceKind::Http => AnySource::Http(HttpSampleSource::new(
                &config.base_url,
                Duration::from_millis(config.request_timeout_ms),
            )?),
            SourceKind::Simulated => {
                AnySource::Simulated(SimulatedSource::new(config.min, config.max, config.seed))
            }
        })
    }
}

impl SampleSource for AnySource {
    async fn fetch_current(&self) -> FetchResult<Reading> {
        match self {
            AnySource::Http(s) => s.fetch_current().await,
            AnySource::Simulated(s) => s.fetch_current().await,
        }
    }

    async fn fetch_history(&self, look_back_seconds: u64) -> FetchResult<Vec<f64>> {
        match self {
            AnySource::Http(s) => s.fetch_history(look_back_seconds).await,
            AnySource::Simulated(s) => s.fetch_history(look_back_seconds).await,
        }
    }
}
