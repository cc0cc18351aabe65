pub mod buffer;
pub mod clock;
pub mod constants;
pub mod delta;
pub mod downsample;
pub mod error;
pub mod format;
pub mod granularity;
pub mod poller;
pub mod projection;
pub mod session;
pub mod source;
