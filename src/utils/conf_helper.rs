use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::net::TcpListener;
use tracing::{info, warn};

use tseries::{option_by_label, SeriesError};

use crate::models::dashboard_model::{DashboardConfig, SourceKind};

const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

/// First CLI argument, then `DASHBOARD_CONFIG`, then `dashboard.json`.
pub fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .filter(|a| !a.starts_with("--"))
        .or_else(|| std::env::var("DASHBOARD_CONFIG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Missing file means defaults.
pub async fn load_config(path: &Path) -> Result<DashboardConfig, SeriesError> {
    if !path.exists() {
        warn!("Config file not found at '{}'; using defaults.", path.display());
        let config = DashboardConfig::default();
        validate(&config)?;
        return Ok(config);
    }

    let data = fs::read_to_string(path).await?;
    let config = parse_config(&data)?;
    info!("Config loaded from {}", path.display());
    Ok(config)
}

pub fn parse_config(data: &str) -> Result<DashboardConfig, SeriesError> {
    let config: DashboardConfig = serde_json::from_str(data)?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &DashboardConfig) -> Result<(), SeriesError> {
    let fail = |msg: String| Err(SeriesError::Config(msg));

    if config.buffer.capacity == 0 {
        return fail("buffer.capacity must be positive".to_string());
    }
    if config.source.poll_interval_ms == 0 {
        return fail("source.poll_interval_ms must be positive".to_string());
    }
    if config.source.request_timeout_ms == 0 {
        return fail("source.request_timeout_ms must be positive".to_string());
    }

    let view = &config.view;
    if !(view.max_lookback_hours.is_finite() && view.max_lookback_hours > 0.0) {
        return fail(format!("view.max_lookback_hours invalid: {}", view.max_lookback_hours));
    }
    if !(0.0..=view.max_lookback_hours).contains(&view.lookback_hours) {
        return fail(format!(
            "view.lookback_hours {} outside [0, {}]",
            view.lookback_hours, view.max_lookback_hours
        ));
    }
    if let Some(label) = &view.granularity {
        if option_by_label(label).is_none() {
            return fail(format!("unknown granularity '{}'", label));
        }
    }

    if config.source.kind == SourceKind::Simulated
        && !(config.source.min.is_finite()
            && config.source.max.is_finite()
            && config.source.min < config.source.max)
    {
        return fail(format!(
            "simulated range [{}, {}) is empty",
            config.source.min, config.source.max
        ));
    }

    Ok(())
}

pub async fn bind(config: &mut DashboardConfig) -> Result<TcpListener, SeriesError> {
    let bind_addr = format!("{}:{}", config.connection.ip, config.connection.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    // port 0 asks the OS for one; report what we actually got
    config.connection.port = listener.local_addr()?.port();

    Ok(listener)
}
