//! Team and member models.
//!
//! A team is a roster entry of a tournament. Each member declares the
//! slots they can personally attend; the team's own availability is
//! derived from those declarations (see [`crate::availability`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A team member and their declared availability.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    /// Member identifier (unique within the team).
    pub id: String,
    /// Slot ids the member has declared as available.
    pub available_slots: BTreeSet<String>,
}

/// A team competing in the tournament.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    /// Unique team identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Team members.
    pub members: Vec<Member>,
}

/// Aggregated availability of one team.
///
/// Holds the slot ids at which at least a quorum of the team's members
/// are available.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamAvailability {
    /// Team this availability belongs to.
    pub team_id: String,
    /// Slot ids where the team can field a quorum.
    pub slots: BTreeSet<String>,
}

impl Member {
    /// Creates a member with no declared availability.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            available_slots: BTreeSet::new(),
        }
    }

    /// Declares availability for a slot.
    pub fn with_slot(mut self, slot_id: impl Into<String>) -> Self {
        self.available_slots.insert(slot_id.into());
        self
    }

    /// Declares availability for several slots.
    pub fn with_slots<I, S>(mut self, slot_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_slots
            .extend(slot_ids.into_iter().map(Into::into));
        self
    }

    /// Whether the member declared the given slot.
    pub fn is_available(&self, slot_id: &str) -> bool {
        self.available_slots.contains(slot_id)
    }

    /// Whether the member has declared anything at all.
    pub fn has_declared(&self) -> bool {
        !self.available_slots.is_empty()
    }
}

impl Team {
    /// Creates a team with no members.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            members: Vec::new(),
        }
    }

    /// Sets the team name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a member.
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

impl TeamAvailability {
    /// Creates an availability record.
    pub fn new(team_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            slots: BTreeSet::new(),
        }
    }

    /// Adds an available slot.
    pub fn with_slot(mut self, slot_id: impl Into<String>) -> Self {
        self.slots.insert(slot_id.into());
        self
    }

    /// Whether the team can play in the given slot.
    #[inline]
    pub fn contains(&self, slot_id: &str) -> bool {
        self.slots.contains(slot_id)
    }

    /// Whether the team has no slot with a quorum.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
