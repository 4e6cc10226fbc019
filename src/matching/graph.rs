//! Pairing-slot compatibility graph.
//!
//! Bipartite graph with pairings on the left (`[0, C(n,2))`, indexed by
//! [`Pairings`]) and slots on the right (`[0, m)`, in slot-list order).
//! An edge `(p, s)` exists iff both teams of pairing `p` are available at
//! slot `s`.

use std::collections::HashMap;

use crate::models::{Pairings, TeamAvailability, Timeslot};

/// Bipartite adjacency structure keyed by integer vertex ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityGraph {
    right_len: usize,
    adjacency: Vec<Vec<usize>>,
}

impl CompatibilityGraph {
    /// Creates a graph with no edges.
    pub fn new(left_len: usize, right_len: usize) -> Self {
        Self {
            right_len,
            adjacency: vec![Vec::new(); left_len],
        }
    }

    /// Adds an edge from a left vertex to a right vertex.
    ///
    /// # Panics
    /// Panics if either vertex is out of range.
    pub fn add_edge(&mut self, left: usize, right: usize) {
        assert!(right < self.right_len, "right vertex {right} out of range");
        self.adjacency[left].push(right);
    }

    /// Builds the compatibility graph of a roster.
    ///
    /// `availability` is index-aligned with the roster: entry `i` belongs to
    /// team `i`. Slot ids that do not appear in `slots` are ignored. Edges of
    /// each pairing are inserted in slot-list order.
    pub fn build(availability: &[TeamAvailability], slots: &[Timeslot]) -> Self {
        let pairings = Pairings::new(availability.len());
        let slot_index: HashMap<&str, usize> = slots
            .iter()
            .enumerate()
            .map(|(k, s)| (s.id.as_str(), k))
            .collect();

        // available[i][k]: team i can play in slot k
        let available: Vec<Vec<bool>> = availability
            .iter()
            .map(|team| {
                let mut row = vec![false; slots.len()];
                for slot in &team.slots {
                    if let Some(&k) = slot_index.get(slot.as_str()) {
                        row[k] = true;
                    }
                }
                row
            })
            .collect();

        let mut graph = Self::new(pairings.len(), slots.len());
        for (p, pairing) in pairings.iter().enumerate() {
            let a = &available[pairing.first];
            let b = &available[pairing.second];
            for k in 0..slots.len() {
                if a[k] && b[k] {
                    graph.adjacency[p].push(k);
                }
            }
        }
        graph
    }

    /// Number of left vertices (pairings).
    #[inline]
    pub fn left_len(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of right vertices (slots).
    #[inline]
    pub fn right_len(&self) -> usize {
        self.right_len
    }

    /// Right neighbours of a left vertex, in insertion order.
    #[inline]
    pub fn neighbors(&self, left: usize) -> &[usize] {
        &self.adjacency[left]
    }

    /// Whether the edge `(left, right)` exists.
    pub fn has_edge(&self, left: usize, right: usize) -> bool {
        self.adjacency
            .get(left)
            .is_some_and(|adj| adj.contains(&right))
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Left vertices with no edge at all.
    pub fn isolated_left(&self) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .filter(|(_, adj)| adj.is_empty())
            .map(|(p, _)| p)
    }
}
