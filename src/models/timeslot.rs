//! Time slot models.
//!
//! A tournament offers an ordered list of fixed slots in which matches can
//! be played. Slots are produced by an external generator (e.g. slicing the
//! tournament window into 30-minute pieces); this crate only consumes them.
//!
//! # Time Model
//! All times are in milliseconds relative to a scheduling epoch.
//! The consumer defines what epoch means.

use serde::{Deserialize, Serialize};

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (ms, inclusive).
    pub start_ms: i64,
    /// Interval end (ms, exclusive).
    pub end_ms: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Duration of this window (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Whether the window has a positive length.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.end_ms > self.start_ms
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }
}

/// A bookable tournament slot.
///
/// The `id` is what members refer to when declaring availability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timeslot {
    /// Stable slot identifier.
    pub id: String,
    /// When the slot takes place.
    pub window: TimeWindow,
}

impl Timeslot {
    /// Creates a slot covering [start_ms, end_ms).
    pub fn new(id: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        Self {
            id: id.into(),
            window: TimeWindow::new(start_ms, end_ms),
        }
    }

    /// Slot start (ms).
    #[inline]
    pub fn start_ms(&self) -> i64 {
        self.window.start_ms
    }

    /// Slot end (ms).
    #[inline]
    pub fn end_ms(&self) -> i64 {
        self.window.end_ms
    }
}
