//! Tournament-scoped scheduler configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::availability::Quorum;

/// Scheduler parameters.
///
/// Deserializes with defaults for missing fields, so a tournament only
/// needs to state what it overrides.
///
/// # Example
/// ```
/// use u_roundrobin::scheduler::SchedulerConfig;
///
/// let config: SchedulerConfig =
///     serde_json::from_str(r#"{ "min_players_per_team": 3 }"#).unwrap();
/// assert_eq!(config.min_players_per_team.get(), 3);
/// assert_eq!(config.min_teams, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Quorum: members that must share a slot for their team to play in it.
    pub min_players_per_team: Quorum,
    /// Smallest roster accepted by input validation.
    pub min_teams: usize,
    /// Wall-clock budget for the matching phases, measured from the first
    /// phase. `None` = unbounded.
    pub time_limit_ms: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_players_per_team: Quorum::ONE,
            min_teams: 2,
            time_limit_ms: None,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quorum.
    pub fn with_min_players_per_team(mut self, quorum: Quorum) -> Self {
        self.min_players_per_team = quorum;
        self
    }

    /// Sets the minimum roster size.
    pub fn with_min_teams(mut self, min_teams: usize) -> Self {
        self.min_teams = min_teams;
        self
    }

    /// Sets the time limit.
    pub fn with_time_limit_ms(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = Some(time_limit_ms);
        self
    }

    /// Time limit as a duration.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}
