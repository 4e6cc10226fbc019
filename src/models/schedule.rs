//! Match schedule (solution) model.
//!
//! A match schedule binds every pairing of the roster to one slot. The
//! [`TournamentSchedule`] tracks the generation lifecycle of a tournament's
//! schedule: not generated, in progress, generated, or failed with a message.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::TeamAvailability;
use crate::error::ScheduleStateError;

/// A scheduled match between two teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// First team (lower roster index).
    pub team_a: String,
    /// Second team (higher roster index).
    pub team_b: String,
    /// Slot the match is played in.
    pub slot_id: String,
    /// Start time (ms).
    pub start_ms: i64,
    /// End time (ms).
    pub end_ms: i64,
}

impl Match {
    /// Creates a new match.
    pub fn new(
        team_a: impl Into<String>,
        team_b: impl Into<String>,
        slot_id: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
    ) -> Self {
        Self {
            team_a: team_a.into(),
            team_b: team_b.into(),
            slot_id: slot_id.into(),
            start_ms,
            end_ms,
        }
    }

    /// Whether the given team plays in this match.
    pub fn involves(&self, team_id: &str) -> bool {
        self.team_a == team_id || self.team_b == team_id
    }

    /// Duration (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Generation status of a tournament schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleStatus {
    /// No generation has been attempted yet.
    #[default]
    NotGenerated,
    /// A generation run is in flight.
    InProgress,
    /// The last run produced a full match list.
    Generated,
    /// The last run failed; see the error message.
    Error,
}

/// Receiver of schedule generation outcomes.
///
/// Implemented by whatever owns the persisted schedule. The scheduler only
/// requests these effects; it never performs persistence itself.
pub trait ScheduleSink {
    /// Stores a complete match list.
    fn record_success(&mut self, matches: &[Match]);

    /// Marks the schedule as failed with a message.
    fn record_failure(&mut self, message: &str);

    /// Clears every team's availability so teams can redeclare.
    fn reset_team_availability(&mut self);
}

/// In-memory schedule state of one tournament.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TournamentSchedule {
    status: ScheduleStatus,
    error_message: Option<String>,
    matches: Vec<Match>,
    team_availability: HashMap<String, TeamAvailability>,
}

impl TournamentSchedule {
    /// Creates an empty, not-yet-generated schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    pub fn status(&self) -> ScheduleStatus {
        self.status
    }

    /// Error message of the last failed run.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Marks a generation run as started.
    ///
    /// Only one run may be in flight per schedule.
    pub fn begin_generation(&mut self) -> Result<(), ScheduleStateError> {
        if self.status == ScheduleStatus::InProgress {
            return Err(ScheduleStateError::AlreadyInProgress);
        }
        self.status = ScheduleStatus::InProgress;
        self.error_message = None;
        Ok(())
    }

    /// Stored matches.
    ///
    /// Fails if no run has completed, or if the last run failed.
    pub fn matches(&self) -> Result<&[Match], ScheduleStateError> {
        match self.status {
            ScheduleStatus::Generated => Ok(&self.matches),
            ScheduleStatus::Error => Err(ScheduleStateError::GenerationFailed(
                self.error_message.clone().unwrap_or_default(),
            )),
            ScheduleStatus::NotGenerated => Err(ScheduleStateError::NotGenerated),
            ScheduleStatus::InProgress => Err(ScheduleStateError::AlreadyInProgress),
        }
    }

    /// Records the aggregated availability of a team.
    pub fn set_team_availability(&mut self, availability: TeamAvailability) {
        self.team_availability
            .insert(availability.team_id.clone(), availability);
    }

    /// Availability recorded for a team.
    pub fn team_availability(&self, team_id: &str) -> Option<&TeamAvailability> {
        self.team_availability.get(team_id)
    }

    /// Number of teams with recorded availability.
    pub fn teams_with_availability(&self) -> usize {
        self.team_availability.len()
    }

    /// Matches played by a team.
    pub fn matches_for_team(&self, team_id: &str) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.involves(team_id)).collect()
    }

    /// Match scheduled in a slot.
    pub fn match_in_slot(&self, slot_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.slot_id == slot_id)
    }
}

impl ScheduleSink for TournamentSchedule {
    fn record_success(&mut self, matches: &[Match]) {
        self.matches = matches.to_vec();
        self.status = ScheduleStatus::Generated;
        self.error_message = None;
    }

    fn record_failure(&mut self, message: &str) {
        self.matches.clear();
        self.status = ScheduleStatus::Error;
        self.error_message = Some(message.to_string());
    }

    fn reset_team_availability(&mut self) {
        self.team_availability.clear();
    }
}
