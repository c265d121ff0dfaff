//! Timing configuration.
//!
//! The widget's suspension points (open/close transitions, local-mode latency) are plain
//! durations resolved once at construction. [`Timings::immediate`] turns all of them off,
//! which keeps tests deterministic without a paused clock.

use crate::constants::{DEFAULT_LOCAL_LATENCY, DEFAULT_SETTLE_DELAY};
use std::time::Duration;

/// Fixed delays applied by the widget and the local data source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Open/close transition time; focus moves and the overlay is hidden after it.
    pub settle: Duration,
    /// Artificial latency of local-mode searches.
    pub local_latency: Duration,
}

impl Timings {
    /// No delays at all.
    pub const fn immediate() -> Self {
        Self {
            settle: Duration::ZERO,
            local_latency: Duration::ZERO,
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            settle: DEFAULT_SETTLE_DELAY,
            local_latency: DEFAULT_LOCAL_LATENCY,
        }
    }
}

/// Sleep for `delay`, skipping the timer entirely for a zero duration.
pub async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
