//! Per-depth count of bounded regions

use std::collections::BTreeMap;

/// Number of bounded regions found at each depth of a partition tree.
///
/// Only depths with at least one bounded region are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthCensus {
    counts: BTreeMap<usize, usize>,
}

impl DepthCensus {
    /// Create an empty census
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a census from `(depth, count)` pairs; zero counts are dropped
    /// and repeated depths are summed.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut census = Self::new();
        for (depth, count) in counts {
            if count > 0 {
                *census.counts.entry(depth).or_insert(0) += count;
            }
        }
        census
    }

    pub(crate) fn record(&mut self, depth: usize) {
        *self.counts.entry(depth).or_insert(0) += 1;
    }

    /// Bounded regions at `depth`
    pub fn get(&self, depth: usize) -> usize {
        self.counts.get(&depth).copied().unwrap_or(0)
    }

    /// Shallowest depth with a bounded region
    pub fn min_depth(&self) -> Option<usize> {
        self.counts.keys().next().copied()
    }

    /// Deepest depth with a bounded region
    pub fn max_depth(&self) -> Option<usize> {
        self.counts.keys().next_back().copied()
    }

    /// Total number of bounded regions
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of populated depths
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no depth holds a bounded region
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(depth, count)` pairs in increasing depth order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&d, &c)| (d, c))
    }
}
