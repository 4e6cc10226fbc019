//! Round-robin match scheduler.
//!
//! # Algorithm
//!
//! 1. Aggregate member declarations into team availability (quorum rule).
//! 2. Reject rosters with more pairings than slots (`C(n,2) > m`).
//! 3. Build the pairing × slot compatibility graph.
//! 4. Compute a maximum matching (Hopcroft–Karp).
//! 5. Emit one match per pairing if the matching saturates every pairing,
//!    otherwise report an unmatched pairing.
//!
//! The result is all-or-nothing: no partial match list is ever produced.
//!
//! # Complexity
//! O(n² · m) to build the graph, O(E · √(n² + m)) to match.

use std::sync::atomic::AtomicBool;

use log::{info, warn};

use super::SchedulerConfig;
use crate::availability;
use crate::error::ScheduleError;
use crate::matching::{CompatibilityGraph, HopcroftKarp, Matching, StopCondition};
use crate::models::{Match, Pairing, Pairings, ScheduleSink, Team, TeamAvailability, Timeslot};

/// Input container for scheduling.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRequest {
    /// Ordered, deduplicated roster.
    pub teams: Vec<Team>,
    /// Ordered slot list.
    pub slots: Vec<Timeslot>,
}

impl ScheduleRequest {
    /// Creates a new schedule request.
    pub fn new(teams: Vec<Team>, slots: Vec<Timeslot>) -> Self {
        Self { teams, slots }
    }
}

/// Assigns every pairing of a roster to a distinct, mutually available slot.
///
/// # Example
///
/// ```
/// use u_roundrobin::models::{Member, Team, Timeslot};
/// use u_roundrobin::scheduler::{RoundRobinScheduler, ScheduleRequest};
///
/// let teams = vec![
///     Team::new("A").with_member(Member::new("a1").with_slots(["S1", "S2"])),
///     Team::new("B").with_member(Member::new("b1").with_slots(["S1", "S3"])),
///     Team::new("C").with_member(Member::new("c1").with_slots(["S2", "S3"])),
/// ];
/// let slots = vec![
///     Timeslot::new("S1", 0, 1_800_000),
///     Timeslot::new("S2", 1_800_000, 3_600_000),
///     Timeslot::new("S3", 3_600_000, 5_400_000),
/// ];
///
/// let scheduler = RoundRobinScheduler::new();
/// let matches = scheduler.schedule(&ScheduleRequest::new(teams, slots)).unwrap();
/// assert_eq!(matches.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoundRobinScheduler {
    config: SchedulerConfig,
}

impl RoundRobinScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules a request under the configured time limit.
    pub fn schedule(&self, request: &ScheduleRequest) -> Result<Vec<Match>, ScheduleError> {
        self.schedule_with_stop(request, &self.stop_condition(None))
    }

    /// Schedules a request that can also be stopped through `interrupt`.
    pub fn schedule_interruptible(
        &self,
        request: &ScheduleRequest,
        interrupt: &AtomicBool,
    ) -> Result<Vec<Match>, ScheduleError> {
        self.schedule_with_stop(request, &self.stop_condition(Some(interrupt)))
    }

    /// Schedules a request under an explicit stop condition.
    pub fn schedule_with_stop(
        &self,
        request: &ScheduleRequest,
        stop: &StopCondition<'_>,
    ) -> Result<Vec<Match>, ScheduleError> {
        let team_availability =
            availability::aggregate(&request.teams, self.config.min_players_per_team);
        self.assign(&team_availability, &request.slots, stop)
    }

    /// Assigns slots from already-aggregated team availability.
    ///
    /// `team_availability` is the roster: one entry per team, in roster order.
    pub fn assign(
        &self,
        team_availability: &[TeamAvailability],
        slots: &[Timeslot],
        stop: &StopCondition<'_>,
    ) -> Result<Vec<Match>, ScheduleError> {
        let pairings = Pairings::new(team_availability.len());
        if pairings.len() > slots.len() {
            let err = ScheduleError::TooManyPairings {
                pairings: pairings.len(),
                slots: slots.len(),
            };
            warn!("{err}");
            return Err(err);
        }

        let graph = CompatibilityGraph::build(team_availability, slots);
        let matching = HopcroftKarp::new(&graph).run(stop)?;
        let matches = assemble(&pairings, team_availability, slots, &matching)?;

        info!(
            "scheduled {} match(es) for {} team(s) across {} slot(s)",
            matches.len(),
            team_availability.len(),
            slots.len()
        );
        Ok(matches)
    }

    /// Schedules a request and reports the outcome to `sink`.
    ///
    /// On success the matches are recorded. On failure the message is
    /// recorded and, unless the run was cancelled, the sink is asked to
    /// clear team availability so teams can redeclare.
    pub fn generate<S: ScheduleSink>(
        &self,
        request: &ScheduleRequest,
        sink: &mut S,
    ) -> Result<Vec<Match>, ScheduleError> {
        match self.schedule(request) {
            Ok(matches) => {
                sink.record_success(&matches);
                Ok(matches)
            }
            Err(err) => {
                sink.record_failure(&err.to_string());
                if err.requires_availability_reset() {
                    sink.reset_team_availability();
                }
                Err(err)
            }
        }
    }

    fn stop_condition<'a>(&self, interrupt: Option<&'a AtomicBool>) -> StopCondition<'a> {
        let mut stop = StopCondition::never();
        if let Some(flag) = interrupt {
            stop = stop.with_interrupt(flag);
        }
        if let Some(limit) = self.config.time_limit() {
            stop = stop.with_time_limit(limit);
        }
        stop
    }
}

/// Turns a matching into matches, or names an unmatched pairing.
fn assemble(
    pairings: &Pairings,
    team_availability: &[TeamAvailability],
    slots: &[Timeslot],
    matching: &Matching,
) -> Result<Vec<Match>, ScheduleError> {
    let unmatched: Vec<usize> = matching.unmatched_left().collect();
    if let Some(pairing) = unmatched.first().and_then(|&p| pairings.pairing_at(p)) {
        return Err(unmatched_error(pairing, team_availability, unmatched.len()));
    }

    let mut matches = Vec::with_capacity(pairings.len());
    for (p, pairing) in pairings.iter().enumerate() {
        let Some(k) = matching.mate(p) else {
            return Err(unmatched_error(pairing, team_availability, 1));
        };
        let slot = &slots[k];
        matches.push(Match::new(
            &team_availability[pairing.first].team_id,
            &team_availability[pairing.second].team_id,
            &slot.id,
            slot.start_ms(),
            slot.end_ms(),
        ));
    }
    Ok(matches)
}

fn unmatched_error(
    pairing: Pairing,
    team_availability: &[TeamAvailability],
    unmatched: usize,
) -> ScheduleError {
    let err = ScheduleError::ImperfectMatching {
        team_a: team_availability[pairing.first].team_id.clone(),
        team_b: team_availability[pairing.second].team_id.clone(),
        unmatched,
    };
    warn!("{err}");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::Quorum;
    use crate::models::{pair_count, Member, ScheduleStatus, TournamentSchedule};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::{BTreeSet, HashMap, HashSet};
    use std::time::Duration;

    const HALF_HOUR: i64 = 30 * 60 * 1000;

    fn slots(n: usize) -> Vec<Timeslot> {
        (0..n)
            .map(|k| {
                let start = k as i64 * HALF_HOUR;
                Timeslot::new(format!("S{k}"), start, start + HALF_HOUR)
            })
            .collect()
    }

    /// One-member team available at the given slots.
    fn team(id: &str, slot_ids: &[&str]) -> Team {
        Team::new(id)
            .with_member(Member::new(format!("{id}-1")).with_slots(slot_ids.iter().copied()))
    }

    fn avail(team: &str, slot_ids: &[&str]) -> TeamAvailability {
        TeamAvailability {
            team_id: team.to_string(),
            slots: slot_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Checks completeness and soundness of a successful schedule.
    fn assert_valid_schedule(
        matches: &[Match],
        availability: &[TeamAvailability],
        slots: &[Timeslot],
    ) {
        assert_eq!(matches.len(), pair_count(availability.len()));

        let by_team: HashMap<&str, &TeamAvailability> =
            availability.iter().map(|a| (a.team_id.as_str(), a)).collect();
        let mut seen_pairs = HashSet::new();
        let mut seen_slots = HashSet::new();

        for m in matches {
            assert_ne!(m.team_a, m.team_b);
            let key = if m.team_a < m.team_b {
                (m.team_a.clone(), m.team_b.clone())
            } else {
                (m.team_b.clone(), m.team_a.clone())
            };
            assert!(seen_pairs.insert(key), "pairing scheduled twice");
            assert!(seen_slots.insert(m.slot_id.clone()), "slot used twice");

            assert!(by_team[m.team_a.as_str()].contains(&m.slot_id));
            assert!(by_team[m.team_b.as_str()].contains(&m.slot_id));

            let slot = slots.iter().find(|s| s.id == m.slot_id).unwrap();
            assert_eq!(m.start_ms, slot.start_ms());
            assert_eq!(m.end_ms, slot.end_ms());
        }
    }

    #[test]
    fn test_unique_slot_per_pairing() {
        // 4 teams, 6 pairings, 6 slots; each pairing shares exactly one slot.
        let teams = vec![
            team("A", &["S0", "S1", "S2"]),
            team("B", &["S0", "S3", "S4"]),
            team("C", &["S1", "S3", "S5"]),
            team("D", &["S2", "S4", "S5"]),
        ];
        let request = ScheduleRequest::new(teams, slots(6));
        let matches = RoundRobinScheduler::new().schedule(&request).unwrap();

        assert_eq!(matches.len(), 6);
        let expected = [
            ("A", "B", "S0"),
            ("A", "C", "S1"),
            ("A", "D", "S2"),
            ("B", "C", "S3"),
            ("B", "D", "S4"),
            ("C", "D", "S5"),
        ];
        for (m, (a, b, s)) in matches.iter().zip(expected) {
            assert_eq!((m.team_a.as_str(), m.team_b.as_str(), m.slot_id.as_str()), (a, b, s));
        }
    }

    #[test]
    fn test_too_many_pairings() {
        // 4 teams need 6 slots; only 5 offered. Availability is irrelevant.
        let all: Vec<&str> = vec!["S0", "S1", "S2", "S3", "S4"];
        let teams = vec![team("A", &all), team("B", &all), team("C", &all), team("D", &all)];
        let err = RoundRobinScheduler::new()
            .schedule(&ScheduleRequest::new(teams, slots(5)))
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::TooManyPairings {
                pairings: 6,
                slots: 5
            }
        );
    }

    #[test]
    fn test_too_many_pairings_checked_before_matching() {
        // Even with the run already interrupted, the structural check wins.
        let flag = AtomicBool::new(true);
        let teams = vec![team("A", &[]), team("B", &[]), team("C", &[])];
        let err = RoundRobinScheduler::new()
            .schedule_interruptible(&ScheduleRequest::new(teams, slots(2)), &flag)
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::TooManyPairings {
                pairings: 3,
                slots: 2
            }
        );
    }

    #[test]
    fn test_imperfect_matching_names_pairing() {
        // A and B share no slot.
        let teams = vec![
            team("A", &["S0", "S1"]),
            team("B", &["S2"]),
            team("C", &["S0", "S1", "S2"]),
        ];
        let err = RoundRobinScheduler::new()
            .schedule(&ScheduleRequest::new(teams, slots(3)))
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::ImperfectMatching {
                team_a: "A".into(),
                team_b: "B".into(),
                unmatched: 1,
            }
        );
    }

    #[test]
    fn test_hall_violation_is_imperfect_not_structural() {
        // Enough slots overall, but all three pairings compete for two.
        let teams = vec![
            team("A", &["S0", "S1"]),
            team("B", &["S0", "S1"]),
            team("C", &["S0", "S1"]),
        ];
        let err = RoundRobinScheduler::new()
            .schedule(&ScheduleRequest::new(teams, slots(4)))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::ImperfectMatching { unmatched: 1, .. }));
    }

    #[test]
    fn test_fewer_than_two_teams() {
        let scheduler = RoundRobinScheduler::new();
        let none = scheduler.schedule(&ScheduleRequest::new(vec![], slots(0))).unwrap();
        assert!(none.is_empty());
        let one = scheduler
            .schedule(&ScheduleRequest::new(vec![team("A", &[])], vec![]))
            .unwrap();
        assert!(one.is_empty());
    }

    #[test]
    fn test_quorum_applied_before_matching() {
        // q = 2: A only reaches quorum at S1, B at S1 and S0.
        let teams = vec![
            Team::new("A")
                .with_member(Member::new("a1").with_slots(["S0", "S1"]))
                .with_member(Member::new("a2").with_slot("S1"))
                .with_member(Member::new("a3")),
            Team::new("B")
                .with_member(Member::new("b1").with_slots(["S0", "S1"]))
                .with_member(Member::new("b2").with_slots(["S0", "S1"])),
        ];
        let config = SchedulerConfig::new().with_min_players_per_team(Quorum::new(2).unwrap());
        let matches = RoundRobinScheduler::new()
            .with_config(config)
            .schedule(&ScheduleRequest::new(teams, slots(2)))
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].slot_id, "S1");
    }

    #[test]
    fn test_quorum_too_high_is_imperfect() {
        let teams = vec![team("A", &["S0"]), team("B", &["S0"])];
        let config = SchedulerConfig::new().with_min_players_per_team(Quorum::new(2).unwrap());
        let err = RoundRobinScheduler::new()
            .with_config(config)
            .schedule(&ScheduleRequest::new(teams, slots(1)))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::ImperfectMatching { .. }));
    }

    #[test]
    fn test_assign_from_availability() {
        let availability = vec![
            avail("A", &["S0", "S1", "S2"]),
            avail("B", &["S0", "S1"]),
            avail("C", &["S1", "S2"]),
        ];
        let slots = slots(3);
        let matches = RoundRobinScheduler::new()
            .assign(&availability, &slots, &StopCondition::never())
            .unwrap();
        assert_valid_schedule(&matches, &availability, &slots);
    }

    #[test]
    fn test_cancelled_run() {
        let flag = AtomicBool::new(true);
        let teams = vec![team("A", &["S0"]), team("B", &["S0"])];
        let err = RoundRobinScheduler::new()
            .schedule_interruptible(&ScheduleRequest::new(teams, slots(1)), &flag)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::Cancelled { .. }));
    }

    #[test]
    fn test_time_limit_from_config() {
        let config = SchedulerConfig::new().with_time_limit_ms(0);
        let teams = vec![team("A", &["S0"]), team("B", &["S0"])];
        let err = RoundRobinScheduler::new()
            .with_config(config)
            .schedule(&ScheduleRequest::new(teams, slots(1)))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::Cancelled { .. }));

        let stop = StopCondition::never().with_time_limit(Duration::from_secs(60));
        let teams = vec![team("A", &["S0"]), team("B", &["S0"])];
        assert!(RoundRobinScheduler::new()
            .schedule_with_stop(&ScheduleRequest::new(teams, slots(1)), &stop)
            .is_ok());
    }

    #[test]
    fn test_time_limit_covers_matching_only() {
        // The budget elapses before matching starts; matching itself is instant.
        let stop = StopCondition::never().with_time_limit(Duration::from_millis(200));
        std::thread::sleep(Duration::from_millis(300));

        let availability = vec![avail("A", &["S0", "S1"]), avail("B", &["S0", "S1"])];
        let slots = slots(2);
        let matches = RoundRobinScheduler::new()
            .assign(&availability, &slots, &stop)
            .unwrap();
        assert_valid_schedule(&matches, &availability, &slots);
    }

    #[test]
    fn test_assemble_emits_every_pairing_in_order() {
        let availability = vec![avail("A", &[]), avail("B", &[]), avail("C", &[])];
        let slots = slots(3);
        let pairings = Pairings::new(3);
        let mut graph = CompatibilityGraph::new(3, 3);
        for (p, k) in [(0, 2), (1, 0), (2, 1)] {
            graph.add_edge(p, k);
        }
        let matching = crate::matching::maximum_matching(&graph);

        let matches = assemble(&pairings, &availability, &slots, &matching).unwrap();
        let got: Vec<(&str, &str, &str)> = matches
            .iter()
            .map(|m| (m.team_a.as_str(), m.team_b.as_str(), m.slot_id.as_str()))
            .collect();
        assert_eq!(got, vec![("A", "B", "S2"), ("A", "C", "S0"), ("B", "C", "S1")]);
    }

    #[test]
    fn test_generate_success_records_matches() {
        let teams = vec![team("A", &["S0"]), team("B", &["S0"])];
        let mut state = TournamentSchedule::new();
        state.begin_generation().unwrap();

        RoundRobinScheduler::new()
            .generate(&ScheduleRequest::new(teams, slots(1)), &mut state)
            .unwrap();
        assert_eq!(state.status(), ScheduleStatus::Generated);
        assert_eq!(state.matches().unwrap().len(), 1);
    }

    #[test]
    fn test_generate_failure_resets_availability() {
        let teams = vec![team("A", &["S0"]), team("B", &["S1"])];
        let mut state = TournamentSchedule::new();
        for a in availability::aggregate(&teams, Quorum::ONE) {
            state.set_team_availability(a);
        }
        state.begin_generation().unwrap();

        let err = RoundRobinScheduler::new()
            .generate(&ScheduleRequest::new(teams, slots(2)), &mut state)
            .unwrap_err();
        assert_eq!(state.status(), ScheduleStatus::Error);
        assert_eq!(state.error_message(), Some(err.to_string().as_str()));
        assert_eq!(state.teams_with_availability(), 0);
    }

    #[test]
    fn test_generate_cancelled_keeps_availability() {
        let teams = vec![team("A", &["S0"]), team("B", &["S0"])];
        let mut state = TournamentSchedule::new();
        for a in availability::aggregate(&teams, Quorum::ONE) {
            state.set_team_availability(a);
        }
        let config = SchedulerConfig::new().with_time_limit_ms(0);

        let err = RoundRobinScheduler::new()
            .with_config(config)
            .generate(&ScheduleRequest::new(teams, slots(1)), &mut state)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::Cancelled { .. }));
        assert_eq!(state.status(), ScheduleStatus::Error);
        assert_eq!(state.teams_with_availability(), 2);
    }

    /// Exhaustive search for a left-saturating assignment.
    fn perfect_exists(availability: &[TeamAvailability], slots: &[Timeslot]) -> bool {
        fn search(p: usize, options: &[Vec<usize>], used: &mut Vec<bool>) -> bool {
            if p == options.len() {
                return true;
            }
            for &k in &options[p] {
                if !used[k] {
                    used[k] = true;
                    if search(p + 1, options, used) {
                        return true;
                    }
                    used[k] = false;
                }
            }
            false
        }

        let pairings = Pairings::new(availability.len());
        let options: Vec<Vec<usize>> = pairings
            .iter()
            .map(|pair| {
                (0..slots.len())
                    .filter(|&k| {
                        availability[pair.first].contains(&slots[k].id)
                            && availability[pair.second].contains(&slots[k].id)
                    })
                    .collect()
            })
            .collect();
        search(0, &options, &mut vec![false; slots.len()])
    }

    #[test]
    fn test_succeeds_whenever_possible() {
        let mut rng = StdRng::seed_from_u64(42);
        let scheduler = RoundRobinScheduler::new();

        for _ in 0..200 {
            let n = rng.random_range(0..5);
            let m = rng.random_range(0..8);
            let slots = slots(m);
            let availability: Vec<TeamAvailability> = (0..n)
                .map(|i| TeamAvailability {
                    team_id: format!("T{i}"),
                    slots: slots
                        .iter()
                        .filter(|_| rng.random_bool(0.6))
                        .map(|s| s.id.clone())
                        .collect::<BTreeSet<_>>(),
                })
                .collect();

            let result = scheduler.assign(&availability, &slots, &StopCondition::never());
            if pair_count(n) > m {
                assert!(matches!(result, Err(ScheduleError::TooManyPairings { .. })));
            } else if perfect_exists(&availability, &slots) {
                assert_valid_schedule(&result.unwrap(), &availability, &slots);
            } else {
                assert!(matches!(result, Err(ScheduleError::ImperfectMatching { .. })));
            }
        }
    }
}
