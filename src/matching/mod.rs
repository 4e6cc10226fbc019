//! Bipartite matching between team pairings and time slots.
//!
//! # Modules
//!
//! - **`graph`**: `CompatibilityGraph`, pairings × slots, with an edge where
//!   both teams of a pairing are available.
//! - **`hopcroft_karp`**: maximum-cardinality matching over that graph.
//! - **`stop`**: interrupt flag and time limit checked between phases.
//!
//! Vertices are plain integer ids (pairings `[0, L)`, slots `[0, m)`);
//! "unmatched" is always `None`, never a reserved index.

mod graph;
mod hopcroft_karp;
mod stop;

pub use graph::CompatibilityGraph;
pub use hopcroft_karp::{maximum_matching, HopcroftKarp, Matching};
pub use stop::StopCondition;
