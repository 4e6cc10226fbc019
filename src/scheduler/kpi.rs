//! Schedule summary metrics (KPIs).
//!
//! Describes a generated round-robin schedule. Reporting only: these
//! numbers never influence which matching is chosen.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Match count | Number of scheduled matches |
//! | Slots used | Distinct slots hosting a match |
//! | Slot utilization | Slots used / slots offered |
//! | Span | Latest match end − earliest match start |
//! | Matches per team | Games each team plays |

use std::collections::{HashMap, HashSet};

use crate::models::{Match, Timeslot};

/// Round-robin schedule indicators.
///
/// All time values are in milliseconds.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Number of matches.
    pub match_count: usize,
    /// Distinct slots that host a match.
    pub slots_used: usize,
    /// Fraction of offered slots in use (0.0..1.0).
    pub slot_utilization: f64,
    /// Earliest match start (ms), if any match exists.
    pub first_start_ms: Option<i64>,
    /// Latest match end (ms), if any match exists.
    pub last_end_ms: Option<i64>,
    /// Time from first start to last end (ms).
    pub span_ms: i64,
    /// Matches per team.
    pub matches_by_team: HashMap<String, usize>,
}

impl ScheduleKpi {
    /// Computes KPIs from matches and the slots that were offered.
    pub fn calculate(matches: &[Match], slots: &[Timeslot]) -> Self {
        let used: HashSet<&str> = matches.iter().map(|m| m.slot_id.as_str()).collect();
        let slot_utilization = if slots.is_empty() {
            0.0
        } else {
            used.len() as f64 / slots.len() as f64
        };

        let first_start_ms = matches.iter().map(|m| m.start_ms).min();
        let last_end_ms = matches.iter().map(|m| m.end_ms).max();
        let span_ms = match (first_start_ms, last_end_ms) {
            (Some(start), Some(end)) => end - start,
            _ => 0,
        };

        let mut matches_by_team: HashMap<String, usize> = HashMap::new();
        for m in matches {
            *matches_by_team.entry(m.team_a.clone()).or_insert(0) += 1;
            *matches_by_team.entry(m.team_b.clone()).or_insert(0) += 1;
        }

        Self {
            match_count: matches.len(),
            slots_used: used.len(),
            slot_utilization,
            first_start_ms,
            last_end_ms,
            span_ms,
            matches_by_team,
        }
    }
}
