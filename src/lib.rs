//! Round-robin tournament scheduling for the U-Engine ecosystem.
//!
//! Assigns every pair of competing teams to a distinct time slot at which
//! both teams can field a quorum of players, or explains precisely why no
//! such schedule exists.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Team`, `Member`, `TeamAvailability`,
//!   `Timeslot`, `Pairing`, `Match`, `TournamentSchedule`
//! - **`availability`**: Quorum-based aggregation of member declarations
//! - **`matching`**: Compatibility graph and Hopcroft–Karp matching
//! - **`scheduler`**: `RoundRobinScheduler`, configuration, and KPIs
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown slots)
//! - **`error`**: `ScheduleError` and `ScheduleStateError`
//!
//! # Pipeline
//!
//! ```text
//! member availability ─▶ aggregate ─▶ team availability
//!                                          │
//!                    slots ─▶ compatibility graph ─▶ Hopcroft–Karp ─▶ matches
//! ```
//!
//! Every call is a pure, synchronous computation with no shared state, so
//! independent tournaments can be scheduled in parallel.
//!
//! # References
//!
//! - Hopcroft & Karp (1973), "An n^5/2 Algorithm for Maximum Matchings in
//!   Bipartite Graphs"
//! - Hall (1935), "On Representatives of Subsets"

pub mod availability;
pub mod error;
pub mod matching;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{ScheduleError, ScheduleStateError};
