//! Cooperative cancellation of the matching phases.
//!
//! The matching engine asks its [`StopCondition`] between phases whether it
//! should keep going. A run can be stopped by an external interrupt flag
//! (set from another thread) or by a wall-clock time limit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Interrupt flag and time budget for one generation run.
#[derive(Debug, Clone)]
pub struct StopCondition<'a> {
    interrupt: Option<&'a AtomicBool>,
    time_limit: Option<Duration>,
    start_time: Instant,
}

impl<'a> StopCondition<'a> {
    /// A condition that never stops the run.
    pub fn never() -> Self {
        Self {
            interrupt: None,
            time_limit: None,
            start_time: Instant::now(),
        }
    }

    /// Stops once `flag` is set to `true`.
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Stops once `limit` has elapsed since the condition was created or
    /// last restarted.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Same condition with the clock reset to now.
    pub fn restarted(&self) -> Self {
        Self {
            start_time: Instant::now(),
            ..self.clone()
        }
    }

    /// Returns the reason to stop, if any.
    pub fn check(&self) -> Option<String> {
        if let Some(flag) = self.interrupt {
            if flag.load(Ordering::Relaxed) {
                return Some("interrupt signal received".to_string());
            }
        }
        if let Some(limit) = self.time_limit {
            if self.start_time.elapsed() >= limit {
                return Some(format!("time limit of {} ms reached", limit.as_millis()));
            }
        }
        None
    }
}

impl Default for StopCondition<'_> {
    fn default() -> Self {
        Self::never()
    }
}
