//! Time-related utilities with clock abstraction for testability.

use chrono::{Local, NaiveTime, Timelike};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current local wall-clock time
    fn now_local(&self) -> NaiveTime;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: NaiveTime,
}

impl FixedClock {
    /// Create a new fixed clock with the given time of day
    pub fn new(fixed_time: NaiveTime) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now_local(&self) -> NaiveTime {
        self.fixed_time
    }
}

/// Format a time of day as `HH:MM:SS` (the prefix used for local chat echo)
pub fn format_hms(time: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}
