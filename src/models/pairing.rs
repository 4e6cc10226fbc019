//! Team pairings and their combinatorial indexing.
//!
//! For a roster of `n` teams there are `C(n, 2)` unordered pairings.
//! Pairings are enumerated lexicographically over roster indices:
//!
//! ```text
//! (0,1) (0,2) ... (0,n-1) (1,2) ... (n-2,n-1)
//!   0     1        n-2    n-1        C(n,2)-1
//! ```
//!
//! The index of a pairing is computed arithmetically, so it does not depend
//! on the iteration order of any container. It is the left-vertex id in the
//! compatibility graph and is used to recover the two teams of a matched
//! pairing.

use serde::{Deserialize, Serialize};

/// An unordered pair of distinct roster indices, stored with `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pairing {
    /// Smaller roster index.
    pub first: usize,
    /// Larger roster index.
    pub second: usize,
}

impl Pairing {
    /// Creates a pairing from two distinct roster indices in any order.
    ///
    /// Returns `None` if both indices are equal.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        let (first, second) = match a.cmp(&b) {
            std::cmp::Ordering::Less => (a, b),
            std::cmp::Ordering::Greater => (b, a),
            std::cmp::Ordering::Equal => return None,
        };
        Some(Self { first, second })
    }
}

/// Number of unordered pairs among `n` items: `C(n, 2)`.
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// The full pairing set of a roster.
///
/// A bijection between `[0, C(n,2))` and the pairings of `n` teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairings {
    team_count: usize,
}

impl Pairings {
    /// Creates the pairing set for `team_count` teams.
    pub fn new(team_count: usize) -> Self {
        Self { team_count }
    }

    /// Number of teams in the roster.
    #[inline]
    pub fn team_count(&self) -> usize {
        self.team_count
    }

    /// Number of pairings, `C(n, 2)`.
    #[inline]
    pub fn len(&self) -> usize {
        pair_count(self.team_count)
    }

    /// Whether the roster yields no pairings (`n < 2`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of a pairing.
    ///
    /// Rows before `first` contribute `(n-1) + (n-2) + ... + (n-first)`
    /// entries; within its row the pairing sits at `second - first - 1`.
    ///
    /// Returns `None` if the pairing references a team outside the roster.
    pub fn index_of(&self, pairing: Pairing) -> Option<usize> {
        let n = self.team_count;
        let Pairing { first: i, second: j } = pairing;
        if j >= n || i >= j {
            return None;
        }
        Some(self.row_offset(i) + (j - i - 1))
    }

    /// Pairing at a given index (inverse of [`Pairings::index_of`]).
    ///
    /// The row is the largest `i` with `row_offset(i) <= index`, the smaller
    /// root of `i² - (2n-1)·i + 2·index = 0` rounded down. The float estimate
    /// is corrected against the exact integer offsets.
    ///
    /// Returns `None` if `index >= C(n, 2)`.
    pub fn pairing_at(&self, index: usize) -> Option<Pairing> {
        if index >= self.len() {
            return None;
        }
        let n = self.team_count;
        let b = (2 * n - 1) as f64;
        let estimate = ((b - (b * b - 8.0 * index as f64).max(0.0).sqrt()) / 2.0).floor();
        let mut first = (estimate.max(0.0) as usize).min(n - 2);
        while first > 0 && self.row_offset(first) > index {
            first -= 1;
        }
        while first + 2 < n && self.row_offset(first + 1) <= index {
            first += 1;
        }
        Some(Pairing {
            first,
            second: first + 1 + (index - self.row_offset(first)),
        })
    }

    /// Index of the first pairing in row `first`.
    #[inline]
    fn row_offset(&self, first: usize) -> usize {
        first * self.team_count - first * (first + 1) / 2
    }

    /// Iterates pairings in index order.
    pub fn iter(&self) -> impl Iterator<Item = Pairing> + '_ {
        let n = self.team_count;
        (0..n).flat_map(move |first| {
            (first + 1..n).map(move |second| Pairing { first, second })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(4), 6);
        assert_eq!(pair_count(10), 45);
    }

    #[test]
    fn test_pairing_normalizes_order() {
        assert_eq!(Pairing::new(3, 1), Pairing::new(1, 3));
        assert_eq!(Pairing::new(3, 1).map(|x| (x.first, x.second)), Some((1, 3)));
        assert_eq!(Pairing::new(2, 2), None);
    }

    #[test]
    fn test_lexicographic_enumeration() {
        let p = Pairings::new(4);
        let order: Vec<(usize, usize)> = p.iter().map(|x| (x.first, x.second)).collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_index_matches_enumeration() {
        for n in 0..12 {
            let p = Pairings::new(n);
            let mut count = 0;
            for (expected, pairing) in p.iter().enumerate() {
                assert_eq!(p.index_of(pairing), Some(expected));
                assert_eq!(p.pairing_at(expected), Some(pairing));
                count += 1;
            }
            assert_eq!(count, p.len());
            assert_eq!(p.pairing_at(p.len()), None);
        }
    }

    #[test]
    fn test_inverse_on_large_roster() {
        let p = Pairings::new(2000);
        let last = p.len() - 1;
        let at = |index| p.pairing_at(index).map(|x| (x.first, x.second));
        assert_eq!(at(last), Some((1998, 1999)));
        assert_eq!(at(1998), Some((0, 1999)));
        assert_eq!(at(1999), Some((1, 2)));
        for index in (0..p.len()).step_by(9973) {
            let pairing = p.pairing_at(index).unwrap();
            assert_eq!(p.index_of(pairing), Some(index));
        }
    }

    #[test]
    fn test_index_out_of_roster() {
        let p = Pairings::new(3);
        let unchecked = |first, second| Pairing { first, second };
        assert_eq!(p.index_of(unchecked(1, 3)), None);
        assert_eq!(p.index_of(unchecked(2, 1)), None);
    }

    #[test]
    fn test_empty_roster() {
        assert!(Pairings::new(0).is_empty());
        assert!(Pairings::new(1).is_empty());
        assert_eq!(Pairings::new(1).iter().count(), 0);
    }
}
