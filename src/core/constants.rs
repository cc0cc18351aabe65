// Engine constants

use crate::core::format::GranularityOption;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_HOUR: f64 = 3_600_000.0;

// Upper bound on plotted points before a coarser granularity is recommended
pub const DISPLAY_BUDGET: usize = 720;

pub const DEFAULT_CAPACITY: usize = 86_400; // one day at 1 Hz
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_LOOKBACK_HOURS: f64 = 1.0;
pub const MAX_LOOKBACK_HOURS: f64 = 10.0;

// Chart label format (local time)
pub const LABEL_FORMAT: &str = "%H:%M:%S";

/// Granularity catalogue, finest to coarsest. Bucket sizes are samples per
/// bucket, which equal seconds at the nominal 1 Hz cadence.
pub const CATALOGUE: [GranularityOption; 8] = [
    GranularityOption::new("1s", 1),
    GranularityOption::new("10s", 10),
    GranularityOption::new("30s", 30),
    GranularityOption::new("1m", 60),
    GranularityOption::new("5m", 300),
    GranularityOption::new("15m", 900),
    GranularityOption::new("30m", 1800),
    GranularityOption::new("1h", 3600),
];
