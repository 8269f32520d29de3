//! Wall clock tracking
//!
//! The terminal has no RTC; the header clock is extrapolated from the
//! monotonic uptime and re-synchronised whenever the feed gateway
//! broadcasts the time of day.

pub mod time;

pub use time::{TimeOfDay, WallClock};
