// Temperature time-series engine
// Main library entry point

pub mod core;

// Re-export main types
pub use crate::core::buffer::RollingBuffer;
pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::delta::deltas;
pub use crate::core::downsample::{downsample, window_filter};
pub use crate::core::error::{FetchError, Result, SeriesError};
pub use crate::core::format::{
    AggregatedPoint, ChartSeries, DeltaPoint, GranularityOption, HistoryOrder, Reading, Sample,
};
pub use crate::core::granularity::{option_by_label, recommend, threshold_for};
pub use crate::core::poller::{spawn_poller, PollerHandle};
pub use crate::core::projection::DashboardView;
pub use crate::core::session::{BufferProfile, Session, SharedSession};
pub use crate::core::source::{reconstruct_history, FetchResult, SampleSource};
