//! Round-robin scheduling domain models.
//!
//! Provides the data types consumed and produced by the scheduler.
//!
//! | Type | Role |
//! |------|------|
//! | `Team`, `Member` | Roster and per-member declared availability |
//! | `TeamAvailability` | Slots where a team can field a quorum |
//! | `Timeslot`, `TimeWindow` | Bookable slots offered by the tournament |
//! | `Pairing`, `Pairings` | Unordered team pairs and their stable indices |
//! | `Match`, `TournamentSchedule` | Generated matches and schedule lifecycle |

mod pairing;
mod schedule;
mod team;
mod timeslot;

pub use pairing::{pair_count, Pairing, Pairings};
pub use schedule::{Match, ScheduleSink, ScheduleStatus, TournamentSchedule};
pub use team::{Member, Team, TeamAvailability};
pub use timeslot::{TimeWindow, Timeslot};
