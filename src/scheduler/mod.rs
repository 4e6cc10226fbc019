//! Round-robin scheduling and schedule metrics.
//!
//! # Algorithm
//!
//! `RoundRobinScheduler` reduces round-robin slot assignment to maximum
//! bipartite matching between team pairings and time slots. It succeeds
//! exactly when every pairing can be given its own mutually available slot.
//!
//! # KPI
//!
//! `ScheduleKpi` summarizes a generated schedule: slot utilization, span,
//! and matches per team.

mod config;
mod kpi;
mod round_robin;

pub use config::SchedulerConfig;
pub use kpi::ScheduleKpi;
pub use round_robin::{RoundRobinScheduler, ScheduleRequest};
