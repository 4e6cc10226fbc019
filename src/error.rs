//! Error types for round-robin schedule generation.

/// Why a schedule could not be generated.
///
/// Every variant is an expected business outcome: retrying with the same
/// input yields the same result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// The roster needs more matches than there are slots.
    #[error("number of pairings ({pairings}) exceeds number of available timeslots ({slots})")]
    TooManyPairings { pairings: usize, slots: usize },

    /// At least one pairing could not be given a mutually available slot.
    #[error(
        "no timeslot could be assigned to {team_a} vs {team_b} ({unmatched} pairing(s) unscheduled)"
    )]
    ImperfectMatching {
        team_a: String,
        team_b: String,
        unmatched: usize,
    },

    /// The run was stopped before the matching completed.
    #[error("schedule generation cancelled: {reason}")]
    Cancelled { reason: String },
}

impl ScheduleError {
    /// Whether the teams should be asked to redeclare availability.
    ///
    /// True for the two structural outcomes, false for cancellation.
    pub fn requires_availability_reset(&self) -> bool {
        !matches!(self, Self::Cancelled { .. })
    }
}

/// Misuse of a tournament's schedule state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleStateError {
    /// No schedule has been generated yet.
    #[error("match schedule has not been generated")]
    NotGenerated,

    /// A generation run is already in flight.
    #[error("match schedule generation is already in progress")]
    AlreadyInProgress,

    /// The last generation run failed.
    #[error("match schedule generation failed: {0}")]
    GenerationFailed(String),
}
