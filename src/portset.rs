//! Canonical sets of port intervals.
//!
//! A [`PortSet`] keeps its intervals sorted by start, pairwise disjoint and
//! non-adjacent: for consecutive intervals `prev` and `next`,
//! `next.start > prev.end + 1`. The only mutator is [`PortSet::merge_insert`],
//! so the canonical form cannot be broken from outside.

use std::fmt;

use crate::rule::PortInterval;

/// Sorted, disjoint, non-adjacent set of port intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortSet {
    intervals: Vec<PortInterval>,
}

impl PortSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an interval, merging it with every interval it overlaps or touches.
    ///
    /// Runs in O(n) for n stored intervals. Inserting an interval that is
    /// already covered leaves the set unchanged.
    ///
    /// # Examples
    /// ```
    /// use portgate::{PortInterval, PortSet};
    ///
    /// let mut set = PortSet::new();
    /// set.merge_insert(PortInterval::new(1, 10).unwrap());
    /// set.merge_insert(PortInterval::new(11, 20).unwrap());
    /// assert_eq!(set.as_slice(), &[PortInterval::new(1, 20).unwrap()]);
    /// ```
    pub fn merge_insert(&mut self, interval: PortInterval) {
        if self.intervals.is_empty() {
            self.intervals.push(interval);
            return;
        }

        // First interval that reaches up to (or past) interval.start - 1.
        let first = self
            .intervals
            .partition_point(|iv| u32::from(iv.end()) + 1 < u32::from(interval.start()));

        if self.intervals.get(first) == Some(&interval) {
            return;
        }

        // One past the last interval that starts at or before interval.end + 1.
        let last = self
            .intervals
            .partition_point(|iv| u32::from(iv.start()) <= u32::from(interval.end()) + 1);

        if first == last {
            // Fits strictly inside a gap, or at the head or tail.
            self.intervals.insert(first, interval);
        } else {
            // Merges into one neighbour, or bridges several into one.
            let merged = self.intervals[first..last]
                .iter()
                .fold(interval, |acc, iv| acc.hull(iv));
            self.intervals.splice(first..last, std::iter::once(merged));
        }

        debug_assert!(self.is_canonical());
    }

    /// Check whether `port` is covered by any interval.
    ///
    /// A port that falls into a gap between two intervals is rejected without
    /// looking any further.
    pub fn contains(&self, port: u16) -> bool {
        let idx = self.intervals.partition_point(|iv| iv.end() < port);
        match self.intervals.get(idx) {
            Some(iv) => iv.start() <= port,
            None => false,
        }
    }

    /// Number of disjoint intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Iterate over the intervals in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, PortInterval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[PortInterval] {
        &self.intervals
    }

    /// Total number of ports covered.
    pub fn port_count(&self) -> u32 {
        self.intervals.iter().map(PortInterval::len).sum()
    }

    /// Check the sorted, disjoint, non-adjacent invariant.
    pub fn is_canonical(&self) -> bool {
        self.intervals
            .windows(2)
            .all(|w| u32::from(w[1].start()) > u32::from(w[0].end()) + 1)
    }
}

impl<'a> IntoIterator for &'a PortSet {
    type Item = &'a PortInterval;
    type IntoIter = std::slice::Iter<'a, PortInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<PortInterval> for PortSet {
    fn from_iter<I: IntoIterator<Item = PortInterval>>(iter: I) -> Self {
        let mut set = PortSet::new();
        for interval in iter {
            set.merge_insert(interval);
        }
        set
    }
}

impl fmt::Display for PortSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, iv) in self.intervals.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", iv)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: u16, end: u16) -> PortInterval {
        PortInterval::new(start, end).unwrap()
    }

    fn set_of(intervals: &[(u16, u16)]) -> PortSet {
        intervals.iter().map(|&(s, e)| iv(s, e)).collect()
    }

    #[test]
    fn test_insert_into_empty() {
        let set = set_of(&[(80, 80)]);
        assert_eq!(set.as_slice(), &[iv(80, 80)]);
    }

    #[test]
    fn test_adjacent_intervals_merge() {
        let set = set_of(&[(1, 10), (11, 20)]);
        assert_eq!(set.as_slice(), &[iv(1, 20)]);

        let set = set_of(&[(11, 20), (1, 10)]);
        assert_eq!(set.as_slice(), &[iv(1, 20)]);
    }

    #[test]
    fn test_one_port_gap_stays_separate() {
        let set = set_of(&[(79, 79), (81, 81)]);
        assert_eq!(set.as_slice(), &[iv(79, 79), iv(81, 81)]);

        // Filling the gap bridges both neighbours.
        let mut set = set;
        set.merge_insert(iv(80, 80));
        assert_eq!(set.as_slice(), &[iv(79, 81)]);
    }

    #[test]
    fn test_gap_rejection() {
        let set = set_of(&[(1, 10), (20, 30)]);
        assert!(!set.contains(15));
        assert!(set.contains(10));
        assert!(set.contains(20));
        assert!(set.contains(1));
        assert!(set.contains(30));
        assert!(!set.contains(0));
        assert!(!set.contains(31));
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut set = set_of(&[(10, 20), (40, 50)]);
        let before = set.clone();
        set.merge_insert(iv(10, 20));
        set.merge_insert(iv(40, 50));
        assert_eq!(set, before);
    }

    #[test]
    fn test_subset_is_absorbed() {
        let mut set = set_of(&[(10, 20), (40, 50)]);
        set.merge_insert(iv(12, 18));
        set.merge_insert(iv(40, 40));
        assert_eq!(set.as_slice(), &[iv(10, 20), iv(40, 50)]);
    }

    #[test]
    fn test_insert_between_neighbours() {
        let set = set_of(&[(10, 20), (40, 50), (30, 32)]);
        assert_eq!(set.as_slice(), &[iv(10, 20), iv(30, 32), iv(40, 50)]);
    }

    #[test]
    fn test_insert_at_head_and_tail() {
        let set = set_of(&[(30, 40), (1, 5), (100, 200)]);
        assert_eq!(set.as_slice(), &[iv(1, 5), iv(30, 40), iv(100, 200)]);

        let set = set_of(&[(30, 40), (41, 45), (25, 29)]);
        assert_eq!(set.as_slice(), &[iv(25, 45)]);
    }

    #[test]
    fn test_extend_single_neighbour() {
        let set = set_of(&[(10, 20), (40, 50), (15, 25)]);
        assert_eq!(set.as_slice(), &[iv(10, 25), iv(40, 50)]);

        let set = set_of(&[(10, 20), (40, 50), (35, 42)]);
        assert_eq!(set.as_slice(), &[iv(10, 20), iv(35, 50)]);
    }

    #[test]
    fn test_bridge_many_neighbours() {
        let mut set = set_of(&[(1, 2), (5, 6), (9, 10), (13, 14), (30, 31)]);
        set.merge_insert(iv(3, 12));
        assert_eq!(set.as_slice(), &[iv(1, 14), iv(30, 31)]);
    }

    #[test]
    fn test_superset_replaces_everything() {
        let mut set = set_of(&[(5, 6), (9, 10), (13, 14)]);
        set.merge_insert(PortInterval::full());
        assert_eq!(set.as_slice(), &[PortInterval::full()]);
        assert!(set.contains(0));
        assert!(set.contains(65535));
    }

    #[test]
    fn test_boundary_ports() {
        let set = set_of(&[(65535, 65535), (0, 0), (65534, 65534)]);
        assert_eq!(set.as_slice(), &[iv(0, 0), iv(65534, 65535)]);
        assert!(set.contains(0));
        assert!(!set.contains(1));
        assert!(set.contains(65535));
    }

    #[test]
    fn test_display() {
        let set = set_of(&[(80, 80), (1000, 2000)]);
        assert_eq!(set.to_string(), "80,1000-2000");
        assert_eq!(set.port_count(), 1002);
    }

    /// Random insertion sequences agree with a plain bitmap and stay canonical.
    #[test]
    fn test_random_sequences_match_bitmap() {
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for _ in 0..200 {
            let mut set = PortSet::new();
            let mut bitmap = vec![false; 256];
            for _ in 0..12 {
                let a = (next() % 256) as u16;
                let b = (next() % 256) as u16;
                let (start, end) = if a <= b { (a, b.min(a + 20)) } else { (b, a.min(b + 20)) };
                set.merge_insert(iv(start, end));
                for p in start..=end {
                    bitmap[p as usize] = true;
                }
                assert!(set.is_canonical(), "not canonical: {}", set);
            }
            for (port, &expected) in bitmap.iter().enumerate() {
                assert_eq!(set.contains(port as u16), expected, "port {} in {}", port, set);
            }
        }
    }
}
