use serde::{Deserialize, Serialize};

use tseries::core::constants::{DEFAULT_LOOKBACK_HOURS, MAX_LOOKBACK_HOURS};
use tseries::{BufferProfile, HistoryOrder};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub name: String,
    pub version: String,
    pub connection: Connection,
    pub source: SourceConfig,
    pub buffer: BufferProfile,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Connection {
    pub ip: String,
    pub port: u16,
}

impl Default for Connection {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 8890,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Http,
    Simulated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    pub history_seconds: u64,
    pub history_order: HistoryOrder,
    // simulated source only
    pub seed: Option<u64>,
    pub min: f64,
    pub max: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Http,
            base_url: "http://localhost:8889".to_string(),
            poll_interval_ms: 1000,
            request_timeout_ms: 5000,
            history_seconds: 3600,
            history_order: HistoryOrder::OldestFirst,
            seed: None,
            min: -43.0,
            max: -42.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub lookback_hours: f64,
    pub max_lookback_hours: f64,
    pub granularity: Option<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
            max_lookback_hours: MAX_LOOKBACK_HOURS,
            granularity: None,
        }
    }
}
