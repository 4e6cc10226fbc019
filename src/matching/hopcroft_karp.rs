//! Hopcroft–Karp maximum-cardinality bipartite matching.
//!
//! # Algorithm
//!
//! Each phase:
//! 1. **Layering (BFS)** from all free left vertices along alternating
//!    paths (free edge to a right vertex, matched edge back to the left)
//!    until the first layer that reaches a free right vertex.
//! 2. **Augmentation (DFS)** from every free left vertex, following only
//!    edges that advance exactly one layer, flipping each augmenting path
//!    found. Dead-end vertices are removed from the layering so every edge
//!    is inspected at most once per phase.
//!
//! Phases repeat until the layering reaches no free right vertex, at which
//! point no augmenting path exists and the matching is maximum.
//!
//! # Complexity
//! O(E · √V): at most O(√V) phases, each O(E).
//!
//! # Reference
//! Hopcroft & Karp (1973), "An n^5/2 Algorithm for Maximum Matchings in
//! Bipartite Graphs", SIAM J. Computing 2(4).

use std::collections::VecDeque;

use log::{debug, warn};

use super::{CompatibilityGraph, StopCondition};
use crate::error::ScheduleError;

const UNREACHED: usize = usize::MAX;

/// A matching between left and right vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    mate_left: Vec<Option<usize>>,
    mate_right: Vec<Option<usize>>,
    size: usize,
}

impl Matching {
    /// Creates an empty matching.
    pub fn empty(left_len: usize, right_len: usize) -> Self {
        Self {
            mate_left: vec![None; left_len],
            mate_right: vec![None; right_len],
            size: 0,
        }
    }

    /// Right mate of a left vertex.
    #[inline]
    pub fn mate(&self, left: usize) -> Option<usize> {
        self.mate_left.get(left).copied().flatten()
    }

    /// Left mate of a right vertex.
    #[inline]
    pub fn mate_of_right(&self, right: usize) -> Option<usize> {
        self.mate_right.get(right).copied().flatten()
    }

    /// Number of matched pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether nothing is matched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether every left vertex has a mate.
    pub fn is_left_perfect(&self) -> bool {
        self.size == self.mate_left.len()
    }

    /// Left vertices without a mate, in ascending order.
    pub fn unmatched_left(&self) -> impl Iterator<Item = usize> + '_ {
        self.mate_left
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_none())
            .map(|(u, _)| u)
    }

    /// Matched `(left, right)` pairs, in ascending left order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mate_left
            .iter()
            .enumerate()
            .filter_map(|(u, m)| m.map(|v| (u, v)))
    }

    fn link(&mut self, left: usize, right: usize) {
        self.mate_left[left] = Some(right);
        self.mate_right[right] = Some(left);
    }
}

/// Hopcroft–Karp solver over a [`CompatibilityGraph`].
#[derive(Debug)]
pub struct HopcroftKarp<'g> {
    graph: &'g CompatibilityGraph,
    matching: Matching,
    /// BFS layer of each left vertex; `UNREACHED` if not in the layering.
    dist: Vec<usize>,
    /// Next adjacency position to try, per left vertex, within a phase.
    cursor: Vec<usize>,
    phases: usize,
}

impl<'g> HopcroftKarp<'g> {
    /// Prepares a solver starting from the empty matching.
    pub fn new(graph: &'g CompatibilityGraph) -> Self {
        let left = graph.left_len();
        Self {
            graph,
            matching: Matching::empty(left, graph.right_len()),
            dist: vec![UNREACHED; left],
            cursor: vec![0; left],
            phases: 0,
        }
    }

    /// Number of augmenting phases executed so far.
    pub fn phases(&self) -> usize {
        self.phases
    }

    /// Runs phases to completion, checking `stop` before each phase.
    ///
    /// The time limit of `stop` is measured from the start of this call, so
    /// graph construction does not count against it.
    ///
    /// No partial matching is returned when the run is stopped.
    pub fn run(&mut self, stop: &StopCondition<'_>) -> Result<Matching, ScheduleError> {
        let stop = stop.restarted();
        while let Some(shortest) = self.layer() {
            if let Some(reason) = stop.check() {
                warn!(
                    "matching stopped after {} phase(s) at size {}: {}",
                    self.phases,
                    self.matching.len(),
                    reason
                );
                return Err(ScheduleError::Cancelled { reason });
            }
            self.phases += 1;
            let augmented = self.augment_all(shortest);
            debug!(
                "phase {}: shortest path layer {}, {} augmentation(s), matching size {}",
                self.phases,
                shortest,
                augmented,
                self.matching.len()
            );
            if augmented == 0 {
                break;
            }
        }
        Ok(self.matching.clone())
    }

    /// Builds the BFS layering.
    ///
    /// Returns the layer of the left vertices adjacent to a free right
    /// vertex on a shortest augmenting path, or `None` if none exists.
    fn layer(&mut self) -> Option<usize> {
        let mut queue = VecDeque::new();
        for (u, d) in self.dist.iter_mut().enumerate() {
            if self.matching.mate_left[u].is_none() {
                *d = 0;
                queue.push_back(u);
            } else {
                *d = UNREACHED;
            }
        }

        let mut shortest = UNREACHED;
        while let Some(u) = queue.pop_front() {
            if self.dist[u] >= shortest {
                continue;
            }
            for &v in self.graph.neighbors(u) {
                match self.matching.mate_right[v] {
                    None => {
                        if shortest == UNREACHED {
                            shortest = self.dist[u];
                        }
                    }
                    Some(w) => {
                        if self.dist[w] == UNREACHED {
                            self.dist[w] = self.dist[u] + 1;
                            queue.push_back(w);
                        }
                    }
                }
            }
        }

        (shortest != UNREACHED).then_some(shortest)
    }

    /// Augments along a maximal set of vertex-disjoint shortest paths.
    fn augment_all(&mut self, shortest: usize) -> usize {
        self.cursor.iter_mut().for_each(|c| *c = 0);
        let mut augmented = 0;
        for root in 0..self.graph.left_len() {
            if self.matching.mate_left[root].is_none()
                && self.dist[root] == 0
                && self.augment_from(root, shortest)
            {
                augmented += 1;
            }
        }
        augmented
    }

    /// Iterative layered DFS from a free left vertex.
    fn augment_from(&mut self, root: usize, shortest: usize) -> bool {
        let graph = self.graph;
        // path[k] is a left vertex at layer k; via[k] is the right vertex
        // currently matched to path[k + 1].
        let mut path = vec![root];
        let mut via: Vec<usize> = Vec::new();

        while let Some(&u) = path.last() {
            let adj = graph.neighbors(u);
            let mut descend = None;
            while self.cursor[u] < adj.len() {
                let v = adj[self.cursor[u]];
                self.cursor[u] += 1;
                match self.matching.mate_right[v] {
                    None if self.dist[u] == shortest => {
                        self.flip(&path, &via, v);
                        return true;
                    }
                    Some(w) if self.dist[u] < shortest && self.dist[w] == self.dist[u] + 1 => {
                        descend = Some((v, w));
                        break;
                    }
                    _ => {}
                }
            }

            match descend {
                Some((v, w)) => {
                    via.push(v);
                    path.push(w);
                }
                None => {
                    // Dead end for the rest of this phase.
                    self.dist[u] = UNREACHED;
                    path.pop();
                    via.pop();
                }
            }
        }
        false
    }

    /// Applies an augmenting path ending at the free right vertex `free`.
    fn flip(&mut self, path: &[usize], via: &[usize], free: usize) {
        let mut right = free;
        for k in (0..path.len()).rev() {
            self.matching.link(path[k], right);
            if k > 0 {
                right = via[k - 1];
            }
        }
        self.matching.size += 1;
    }
}

/// Computes a maximum matching without any stop condition.
pub fn maximum_matching(graph: &CompatibilityGraph) -> Matching {
    let mut solver = HopcroftKarp::new(graph);
    match solver.run(&StopCondition::never()) {
        Ok(matching) => matching,
        // `never()` has no way to stop the run.
        Err(_) => solver.matching,
    }
}
