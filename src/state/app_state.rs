use std::sync::Arc;

use tseries::{Clock, Session, SeriesError, SharedSession, SystemClock};

use crate::client::AnySource;
use crate::models::dashboard_model::DashboardConfig;

#[derive(Clone)]
pub struct AppState {
    // replaced wholesale on reset; every reader re-locks per request
    pub session: SharedSession,
    pub source: Arc<AnySource>,
    pub config: Arc<DashboardConfig>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: DashboardConfig, source: AnySource) -> Result<Self, SeriesError> {
        Self::with_clock(config, source, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: DashboardConfig,
        source: AnySource,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SeriesError> {
        let session = Session::new(config.buffer, clock.clone())?.into_shared();
        Ok(Self {
            session,
            source: Arc::new(source),
            config: Arc::new(config),
            clock,
        })
    }
}
