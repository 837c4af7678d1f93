//! Monotonic microsecond timestamp source for [`Request`](crate::request::Request)
//! construction.
//!
//! The matching engine's priority relation breaks ties on `ts`, so every request
//! needs a strictly increasing timestamp within one process even if the OS clock
//! ticks backwards or two requests land in the same microsecond.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Issues strictly increasing microsecond timestamps.
///
/// Clamps any reading that is not greater than the previously issued value up to
/// `previous + 1`, per the monotonicity contract in the spec's design notes. A raw
/// `SystemTime::now()` read is never handed to the engine un-clamped.
pub struct MonotonicClock {
    last: Mutex<u64>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { last: Mutex::new(0) }
    }

    /// Returns the next strictly increasing microsecond tick.
    pub fn now_micros(&self) -> u64 {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_micros() as u64;
        let mut last = self.last.lock().unwrap();
        let next = if wall > *last { wall } else { *last + 1 };
        *last = next;
        next
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
