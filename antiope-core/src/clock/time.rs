//! Time-of-day arithmetic and uptime extrapolation

use heapless::String;

/// Seconds in one day
const DAY_SECONDS: u32 = 24 * 60 * 60;

/// A 24-hour wall clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    /// Midnight, the free-running start value before any sync
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Create a time of day; out-of-range fields wrap into range
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
            second: second % 60,
        }
    }

    /// Build from seconds since midnight (wraps at 24h)
    pub fn from_day_seconds(secs: u32) -> Self {
        let secs = secs % DAY_SECONDS;
        Self {
            hour: (secs / 3600) as u8,
            minute: ((secs / 60) % 60) as u8,
            second: (secs % 60) as u8,
        }
    }

    /// Seconds since midnight
    pub fn day_seconds(self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }

    /// This time advanced by `secs` seconds, wrapping at midnight
    pub fn advanced(self, secs: u32) -> Self {
        Self::from_day_seconds(self.day_seconds().wrapping_add(secs % DAY_SECONDS) % DAY_SECONDS)
    }

    /// Zero-padded 24-hour `HH:MM:SS` rendering, always 8 characters
    pub fn hhmmss(self) -> String<8> {
        use core::fmt::Write;
        let mut out = String::new();
        let _ = write!(out, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second);
        out
    }
}

/// Wall clock extrapolated from monotonic uptime
///
/// `sync` pins a time of day to an uptime instant; `now` extrapolates
/// from there. Before the first sync the clock free-runs from midnight.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    base: TimeOfDay,
    base_uptime_ms: u32,
    synced: bool,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    /// Create an unsynchronised clock starting at midnight
    pub fn new() -> Self {
        Self {
            base: TimeOfDay::MIDNIGHT,
            base_uptime_ms: 0,
            synced: false,
        }
    }

    /// Pin the clock to `time` as of the uptime instant `uptime_ms`
    pub fn sync(&mut self, time: TimeOfDay, uptime_ms: u32) {
        self.base = time;
        self.base_uptime_ms = uptime_ms;
        self.synced = true;
    }

    /// Whether a sync has been received
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// The time of day as of the uptime instant `uptime_ms`
    pub fn now(&self, uptime_ms: u32) -> TimeOfDay {
        let elapsed_s = uptime_ms.wrapping_sub(self.base_uptime_ms) / 1000;
        self.base.advanced(elapsed_s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hhmmss_format() {
        assert_eq!(TimeOfDay::new(9, 5, 3).hhmmss().as_str(), "09:05:03");
        assert_eq!(TimeOfDay::new(23, 59, 59).hhmmss().as_str(), "23:59:59");
        assert_eq!(TimeOfDay::MIDNIGHT.hhmmss().as_str(), "00:00:00");
    }

    #[test]
    fn test_hhmmss_always_eight_chars() {
        for hour in 0..24 {
            let t = TimeOfDay::new(hour, 0, 0);
            assert_eq!(t.hhmmss().len(), 8);
        }
    }

    #[test]
    fn test_advance_wraps_at_midnight() {
        let t = TimeOfDay::new(23, 59, 30);
        assert_eq!(t.advanced(45), TimeOfDay::new(0, 0, 15));
    }

    #[test]
    fn test_out_of_range_fields_wrap() {
        let t = TimeOfDay::new(25, 61, 61);
        assert_eq!(t, TimeOfDay::new(1, 1, 1));
    }

    #[test]
    fn test_day_seconds_roundtrip() {
        let t = TimeOfDay::new(12, 34, 56);
        assert_eq!(TimeOfDay::from_day_seconds(t.day_seconds()), t);
    }

    #[test]
    fn test_clock_free_runs_from_midnight() {
        let clock = WallClock::new();
        assert!(!clock.is_synced());
        assert_eq!(clock.now(0), TimeOfDay::MIDNIGHT);
        assert_eq!(clock.now(61_000), TimeOfDay::new(0, 1, 1));
    }

    #[test]
    fn test_clock_extrapolates_from_sync() {
        let mut clock = WallClock::new();
        clock.sync(TimeOfDay::new(14, 30, 0), 10_000);
        assert!(clock.is_synced());
        assert_eq!(clock.now(10_000), TimeOfDay::new(14, 30, 0));
        assert_eq!(clock.now(25_000), TimeOfDay::new(14, 30, 15));
    }

    #[test]
    fn test_resync_overrides() {
        let mut clock = WallClock::new();
        clock.sync(TimeOfDay::new(14, 30, 0), 10_000);
        clock.sync(TimeOfDay::new(16, 0, 0), 20_000);
        assert_eq!(clock.now(21_000), TimeOfDay::new(16, 0, 1));
    }
}
