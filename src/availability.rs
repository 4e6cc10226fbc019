//! Team availability aggregation.
//!
//! A team is available at a slot iff at least `q` of its members declared
//! that slot, where `q` is the tournament's quorum (minimum number of
//! players per team).
//!
//! Aggregation never fails. A team with fewer than `q` members, or whose
//! members never agree on a slot, simply ends up with an empty set; that
//! surfaces later as an unschedulable pairing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::num::NonZeroUsize;

use crate::models::{Team, TeamAvailability};

/// Minimum number of members that must share a slot.
///
/// Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Quorum(NonZeroUsize);

impl Quorum {
    /// A quorum of one member.
    pub const ONE: Quorum = Quorum(NonZeroUsize::MIN);

    /// Creates a quorum. Returns `None` for zero.
    pub fn new(min_members: usize) -> Option<Self> {
        NonZeroUsize::new(min_members).map(Self)
    }

    /// Required member count.
    #[inline]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for Quorum {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Quorum::new(value).ok_or_else(|| "quorum must be at least 1".to_string())
    }
}

impl From<Quorum> for usize {
    fn from(q: Quorum) -> usize {
        q.get()
    }
}

/// Aggregates one team's member declarations under a quorum.
pub fn aggregate_team(team: &Team, quorum: Quorum) -> TeamAvailability {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for member in &team.members {
        for slot in &member.available_slots {
            *counts.entry(slot.as_str()).or_insert(0) += 1;
        }
    }

    let slots: BTreeSet<String> = counts
        .into_iter()
        .filter(|&(_, count)| count >= quorum.get())
        .map(|(slot, _)| slot.to_string())
        .collect();

    TeamAvailability {
        team_id: team.id.clone(),
        slots,
    }
}

/// Aggregates every team of a roster, preserving roster order.
pub fn aggregate(teams: &[Team], quorum: Quorum) -> Vec<TeamAvailability> {
    teams.iter().map(|t| aggregate_team(t, quorum)).collect()
}

/// Ids of teams that cannot field a quorum in any slot.
pub fn teams_without_availability(availability: &[TeamAvailability]) -> Vec<&str> {
    availability
        .iter()
        .filter(|a| a.is_empty())
        .map(|a| a.team_id.as_str())
        .collect()
}
