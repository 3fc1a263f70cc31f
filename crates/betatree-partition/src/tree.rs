//! Arena storage for the partition tree

use crate::census::DepthCensus;
use std::fmt;

/// Index of a region inside a [`PartitionTree`]
pub type RegionId = usize;

/// A node of the partition tree: an axis-aligned, possibly half-open box.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionNode {
    /// Depth in the tree, root = 0
    pub depth: usize,
    /// Per-dimension lower boundary, `None` when unbounded below
    pub low: Vec<Option<f64>>,
    /// Per-dimension upper boundary, `None` when unbounded above
    pub high: Vec<Option<f64>>,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) bounded: bool,
    pub(crate) left: Option<RegionId>,
    pub(crate) right: Option<RegionId>,
    pub(crate) split: Option<Split>,
}

/// Where a region was cut
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    /// Partition coordinate, `depth mod d`
    pub dimension: usize,
    /// Median value; left child's upper and right child's lower bound
    pub value: f64,
    /// Row of the median observation, which belongs to neither child
    pub observation: usize,
}

impl RegionNode {
    /// Number of observations strictly inside the region
    pub fn count(&self) -> usize {
        self.end - self.start
    }

    /// True when every dimension has both boundaries
    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// True when the region was not split
    pub fn is_leaf(&self) -> bool {
        self.left.is_none()
    }

    /// Split information for internal nodes
    pub fn split(&self) -> Option<Split> {
        self.split
    }

    /// Product of the per-dimension extents, `None` when unbounded
    pub fn volume(&self) -> Option<f64> {
        self.low
            .iter()
            .zip(&self.high)
            .try_fold(1.0_f64, |acc, (lo, hi)| Some(acc * ((*hi)? - (*lo)?)))
    }

    /// Lower and upper corners, `None` when unbounded
    pub fn corners(&self) -> Option<(Vec<f64>, Vec<f64>)> {
        let low = self.low.iter().copied().collect::<Option<Vec<_>>>()?;
        let high = self.high.iter().copied().collect::<Option<Vec<_>>>()?;
        Some((low, high))
    }
}

/// An immutable partition tree together with its depth census.
///
/// Nodes are stored in pre-order, so a child's id is always greater than
/// its parent's id. Each node owns a contiguous slice of the observation
/// permutation; the two children own the parts before and after the median.
#[derive(Debug, Clone)]
pub struct PartitionTree {
    pub(crate) nodes: Vec<RegionNode>,
    pub(crate) order: Vec<usize>,
    pub(crate) census: DepthCensus,
    pub(crate) total_count: usize,
    pub(crate) dims: usize,
    pub(crate) leaf_threshold: f64,
}

impl PartitionTree {
    /// Id of the root region
    pub fn root(&self) -> RegionId {
        0
    }

    /// Region by id
    pub fn node(&self, id: RegionId) -> &RegionNode {
        &self.nodes[id]
    }

    /// `(left, right)` children of an internal region
    pub fn children(&self, id: RegionId) -> Option<(RegionId, RegionId)> {
        let node = &self.nodes[id];
        Some((node.left?, node.right?))
    }

    /// Rows of the observations inside a region
    pub fn observations(&self, id: RegionId) -> &[usize] {
        let node = &self.nodes[id];
        &self.order[node.start..node.end]
    }

    /// Number of regions in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has a root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Regions in pre-order, paired with their ids
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (RegionId, &RegionNode)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// Bounded regions per depth
    pub fn census(&self) -> &DepthCensus {
        &self.census
    }

    /// Size of the whole dataset (n), not just the root's count
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Dimension of the sample space
    pub fn dimension(&self) -> usize {
        self.dims
    }

    /// Regions with fewer observations than this are leaves
    pub fn leaf_threshold(&self) -> f64 {
        self.leaf_threshold
    }

    /// Deepest level present in the tree
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }
}

impl fmt::Display for PartitionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PartitionTree({} regions, depth={}, n={}, d={}, bounded={})",
            self.len(),
            self.depth(),
            self.total_count,
            self.dims,
            self.census.total()
        )
    }
}
