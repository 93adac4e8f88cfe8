//! Timer state for automatic draws.
//!
//! The scheduler is either disabled or armed with the instant of its next
//! fire. It never draws by itself; the engine's `tick` consults it.

use serde::{Deserialize, Serialize};

pub const DEFAULT_INTERVAL_SECS: u32 = 10;

/// Upper bound on how often a host must poll `tick` while armed.
pub const MAX_POLL_MS: u64 = 250;

/// Read-only view of the scheduler for rendering and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoDrawState {
    pub enabled: bool,
    pub interval_secs: u32,
    /// Epoch milliseconds of the next fire while armed
    pub next_fire_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoDrawScheduler {
    interval_secs: u32,
    next_fire_at: Option<i64>,
}

impl Default for AutoDrawScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_SECS)
    }
}

impl AutoDrawScheduler {
    pub fn new(interval_secs: u32) -> Self {
        Self {
            interval_secs: interval_secs.max(1),
            next_fire_at: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.next_fire_at.is_some()
    }

    pub fn interval_secs(&self) -> u32 {
        self.interval_secs
    }

    pub fn next_fire_at(&self) -> Option<i64> {
        self.next_fire_at
    }

    fn interval_ms(&self) -> i64 {
        i64::from(self.interval_secs) * 1000
    }

    /// Applies an enable flag and interval. Arming from disabled, or changing
    /// the interval while armed, schedules the next fire from `now_ms`.
    /// Returns true when the armed/disabled state flipped.
    pub fn configure(&mut self, enabled: bool, interval_secs: u32, now_ms: i64) -> bool {
        let interval_secs = interval_secs.max(1);
        let interval_changed = interval_secs != self.interval_secs;
        self.interval_secs = interval_secs;
        let was_enabled = self.is_enabled();
        if !enabled {
            self.next_fire_at = None;
        } else if !was_enabled || interval_changed {
            self.rearm(now_ms);
        }
        was_enabled != enabled
    }

    pub fn rearm(&mut self, now_ms: i64) {
        self.next_fire_at = Some(now_ms + self.interval_ms());
    }

    pub fn disable(&mut self) {
        self.next_fire_at = None;
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        matches!(self.next_fire_at, Some(at) if now_ms >= at)
    }

    pub fn remaining_ms(&self, now_ms: i64) -> Option<i64> {
        self.next_fire_at.map(|at| (at - now_ms).max(0))
    }

    /// Whole seconds until the next fire, rounded up, for countdown display.
    pub fn remaining_secs(&self, now_ms: i64) -> Option<i64> {
        self.remaining_ms(now_ms).map(|ms| (ms + 999) / 1000)
    }

    pub fn state(&self) -> AutoDrawState {
        AutoDrawState {
            enabled: self.is_enabled(),
            interval_secs: self.interval_secs,
            next_fire_at: self.next_fire_at,
        }
    }
}
