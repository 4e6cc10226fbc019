//! Input validation for round-robin scheduling.
//!
//! Checks structural integrity of the roster and slot list before
//! scheduling. The scheduler itself assumes well-formed input; callers
//! run these checks first. Detects:
//! - Duplicate team, slot, and member IDs
//! - Rosters smaller than the configured minimum
//! - Teams with fewer members than the quorum
//! - Member declarations naming slots that don't exist
//! - Slots whose end is not after their start

use crate::models::{Team, Timeslot};
use crate::scheduler::SchedulerConfig;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// The roster has fewer teams than the tournament requires.
    InsufficientTeams,
    /// A team has fewer members than the quorum.
    InsufficientMembers,
    /// A member declared a slot that is not offered.
    InvalidSlotReference,
    /// A slot does not end after it starts.
    InvalidTimeWindow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a round-robin scheduling run.
///
/// Checks:
/// 1. No duplicate slot IDs, and every slot has `end > start`
/// 2. No duplicate team IDs
/// 3. No duplicate member IDs within a team
/// 4. At least `config.min_teams` teams
/// 5. Every team has at least `config.min_players_per_team` members
/// 6. Every declared slot ID refers to an offered slot
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    teams: &[Team],
    slots: &[Timeslot],
    config: &SchedulerConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut slot_ids = HashSet::new();
    for slot in slots {
        if !slot_ids.insert(slot.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate slot ID: {}", slot.id),
            ));
        }
        if !slot.window.is_well_formed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeWindow,
                format!(
                    "Slot '{}' ends at {} but starts at {}",
                    slot.id, slot.window.end_ms, slot.window.start_ms
                ),
            ));
        }
    }

    if teams.len() < config.min_teams {
        errors.push(ValidationError::new(
            ValidationErrorKind::InsufficientTeams,
            format!(
                "Tournament has {} team(s), {} required",
                teams.len(),
                config.min_teams
            ),
        ));
    }

    let quorum = config.min_players_per_team.get();
    let mut team_ids = HashSet::new();
    for team in teams {
        if !team_ids.insert(team.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate team ID: {}", team.id),
            ));
        }

        if team.member_count() < quorum {
            errors.push(ValidationError::new(
                ValidationErrorKind::InsufficientMembers,
                format!(
                    "Team '{}' has {} member(s), {} required",
                    team.id,
                    team.member_count(),
                    quorum
                ),
            ));
        }

        let mut member_ids = HashSet::new();
        for member in &team.members {
            if !member_ids.insert(member.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate member ID '{}' in team '{}'", member.id, team.id),
                ));
            }
            for slot in &member.available_slots {
                if !slot_ids.contains(slot.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidSlotReference,
                        format!(
                            "Member '{}' of team '{}' references unknown slot '{}'",
                            member.id, team.id, slot
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
