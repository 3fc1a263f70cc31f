//! Recursive median partitioning of the sample space

use crate::census::DepthCensus;
use crate::tree::{PartitionTree, RegionId, RegionNode, Split};
use betatree_core::{DataMatrix, Error, Result};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Regions holding fewer observations than `4 · ln(n)` are not split
pub fn leaf_threshold(n: usize) -> f64 {
    4.0 * (n as f64).ln()
}

/// Initial bounding box carved from the data before partitioning.
///
/// Each dimension is trimmed in turn on the subset left by the previous
/// dimensions. The two order statistics at the trimming positions become
/// the box boundaries and, like a split median, belong to neither side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundedInit {
    /// Number of extreme order statistics to drop on each side, per dimension
    OrderStatistics(Vec<usize>),
    /// Quantile in `[0, 0.5)` to drop on each side, per dimension
    Quantiles(Vec<f64>),
}

impl BoundedInit {
    /// Number of per-dimension entries
    pub fn len(&self) -> usize {
        match self {
            Self::OrderStatistics(counts) => counts.len(),
            Self::Quantiles(quantiles) => quantiles.len(),
        }
    }

    /// Check if no dimension is described
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the exclusion against the data dimension
    pub fn validate(&self, dims: usize) -> Result<()> {
        if self.len() != dims {
            return Err(Error::size_mismatch(dims, self.len(), "exclusion vector"));
        }
        if let Self::Quantiles(quantiles) = self {
            if let Some(q) = quantiles.iter().find(|q| !(0.0..0.5).contains(*q)) {
                return Err(Error::InvalidParameter(format!(
                    "Exclusion quantile {q} must be in [0, 0.5)"
                )));
            }
        }
        Ok(())
    }

    /// Order statistics trimmed on each side of dimension `p` for a subset of size `m`
    fn trim_count(&self, p: usize, m: usize) -> usize {
        match self {
            Self::OrderStatistics(counts) => counts[p],
            Self::Quantiles(quantiles) => (quantiles[p] * m as f64).floor() as usize,
        }
    }

    /// Sort-and-trim `order` dimension by dimension, filling in the box
    /// boundaries. Returns the surviving range of `order`.
    fn carve(
        &self,
        data: &DataMatrix,
        order: &mut [usize],
        low: &mut [Option<f64>],
        high: &mut [Option<f64>],
    ) -> Result<(usize, usize)> {
        self.validate(data.n_dims())?;
        let (mut start, mut end) = (0, order.len());

        for p in 0..data.n_dims() {
            let m = end - start;
            let e = self.trim_count(p, m);
            if e.checked_mul(2).and_then(|x| x.checked_add(2)).map_or(true, |x| x > m) {
                return Err(Error::InvalidParameter(format!(
                    "Cannot trim {e} order statistics per side from {m} observations in dimension {p}"
                )));
            }

            order[start..end].sort_by_key(|&i| OrderedFloat(data.value(i, p)));
            low[p] = Some(data.value(order[start + e], p));
            high[p] = Some(data.value(order[end - 1 - e], p));
            start += e + 1;
            end -= e + 1;
            trace!(dimension = p, trimmed = e, remaining = end - start, "bounding box trimmed");
        }

        Ok((start, end))
    }
}

/// Builder for [`PartitionTree`]s
#[derive(Debug, Clone, Default)]
pub struct PartitionBuilder {
    bounded_init: Option<BoundedInit>,
}

struct Pending {
    parent: Option<(RegionId, bool)>,
    depth: usize,
    low: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    start: usize,
    end: usize,
}

impl PartitionBuilder {
    /// Partition starting from an unbounded root
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a bounding box trimmed out of the data
    pub fn with_bounded_init(mut self, init: BoundedInit) -> Self {
        self.bounded_init = Some(init);
        self
    }

    /// The configured bounded initialization, if any
    pub fn bounded_init(&self) -> Option<&BoundedInit> {
        self.bounded_init.as_ref()
    }

    /// Grow the partition tree and its depth census.
    ///
    /// A region splits along `depth mod d` at the observation with 1-based
    /// rank `⌈count/2⌉` in that coordinate (stable sort). Observations
    /// ranked below go left, those ranked above go right, the median itself
    /// goes to neither child.
    #[instrument(skip(self, data), fields(n = data.n_rows(), d = data.n_dims()))]
    pub fn build(&self, data: &DataMatrix) -> Result<PartitionTree> {
        let n = data.n_rows();
        if n < 2 {
            return Err(Error::InsufficientData { expected: 2, actual: n });
        }
        let dims = data.n_dims();
        let threshold = leaf_threshold(n);

        let mut order: Vec<usize> = (0..n).collect();
        let mut low = vec![None; dims];
        let mut high = vec![None; dims];
        let (start, end) = match &self.bounded_init {
            Some(init) => init.carve(data, &mut order, &mut low, &mut high)?,
            None => (0, n),
        };

        let mut nodes: Vec<RegionNode> = Vec::new();
        let mut census = DepthCensus::new();
        let mut stack = vec![Pending {
            parent: None,
            depth: 0,
            low,
            high,
            start,
            end,
        }];

        while let Some(pending) = stack.pop() {
            let id = nodes.len();
            if let Some((parent, is_left)) = pending.parent {
                if is_left {
                    nodes[parent].left = Some(id);
                } else {
                    nodes[parent].right = Some(id);
                }
            }

            let bounded = pending.low.iter().chain(&pending.high).all(Option::is_some);
            if bounded {
                census.record(pending.depth);
            }

            let count = pending.end - pending.start;
            let mut split = None;
            if count > 0 && count as f64 >= threshold {
                let dimension = pending.depth % dims;
                order[pending.start..pending.end]
                    .sort_by_key(|&i| OrderedFloat(data.value(i, dimension)));
                let mid = pending.start + (count + 1) / 2 - 1;
                let observation = order[mid];
                let value = data.value(observation, dimension);
                split = Some(Split { dimension, value, observation });

                let mut right_low = pending.low.clone();
                right_low[dimension] = Some(value);
                let mut left_high = pending.high.clone();
                left_high[dimension] = Some(value);

                stack.push(Pending {
                    parent: Some((id, false)),
                    depth: pending.depth + 1,
                    low: right_low,
                    high: pending.high.clone(),
                    start: mid + 1,
                    end: pending.end,
                });
                stack.push(Pending {
                    parent: Some((id, true)),
                    depth: pending.depth + 1,
                    low: pending.low.clone(),
                    high: left_high,
                    start: pending.start,
                    end: mid,
                });
            }

            nodes.push(RegionNode {
                depth: pending.depth,
                low: pending.low,
                high: pending.high,
                start: pending.start,
                end: pending.end,
                bounded,
                left: None,
                right: None,
                split,
            });
        }

        debug!(
            regions = nodes.len(),
            bounded = census.total(),
            threshold,
            "partition tree built"
        );

        Ok(PartitionTree {
            nodes,
            order,
            census,
            total_count: n,
            dims,
            leaf_threshold: threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> DataMatrix {
        DataMatrix::from_row_major((0..n).map(|i| i as f64).collect(), 1).unwrap()
    }

    #[test]
    fn test_leaf_threshold() {
        assert!((leaf_threshold(2000) - 30.403).abs() < 1e-3);
        assert_eq!(leaf_threshold(1), 0.0);
    }

    #[test]
    fn test_median_split_one_dimension() {
        // n = 100, threshold ~18.4: root (100) splits at rank 50 (value 49)
        let tree = PartitionBuilder::new().build(&line(100)).unwrap();
        let root = tree.node(tree.root());
        let split = root.split().unwrap();
        assert_eq!(split.dimension, 0);
        assert_eq!(split.value, 49.0);

        let (left, right) = tree.children(tree.root()).unwrap();
        assert_eq!(tree.node(left).count(), 49);
        assert_eq!(tree.node(right).count(), 50);
        assert_eq!(tree.node(left).high[0], Some(49.0));
        assert_eq!(tree.node(left).low[0], None);
        assert_eq!(tree.node(right).low[0], Some(49.0));

        // Left child is unbounded below, right-of-left is bounded
        assert!(!tree.node(left).is_bounded());
        let (_, left_right) = tree.children(left).unwrap();
        assert!(tree.node(left_right).is_bounded());
    }

    #[test]
    fn test_tiny_dataset_is_single_leaf() {
        // n = 5: threshold 6.44 > 5
        let tree = PartitionBuilder::new().build(&line(5)).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.node(0).is_leaf());
        assert!(tree.census().is_empty());
    }

    #[test]
    fn test_rejects_single_observation() {
        let err = PartitionBuilder::new().build(&line(1)).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_bounded_init_order_statistics() {
        let tree = PartitionBuilder::new()
            .with_bounded_init(BoundedInit::OrderStatistics(vec![2]))
            .build(&line(100))
            .unwrap();
        let root = tree.node(tree.root());
        assert!(root.is_bounded());
        assert_eq!(root.low[0], Some(2.0));
        assert_eq!(root.high[0], Some(97.0));
        assert_eq!(root.count(), 94);
        assert_eq!(tree.census().get(0), 1);
        assert_eq!(tree.total_count(), 100);
    }

    #[test]
    fn test_bounded_init_quantiles_are_sequential() {
        let rows: Vec<Vec<f64>> = (0..200).map(|i| vec![i as f64, (i % 10) as f64]).collect();
        let data = DataMatrix::from_rows(&rows).unwrap();
        let tree = PartitionBuilder::new()
            .with_bounded_init(BoundedInit::Quantiles(vec![0.05, 0.0]))
            .build(&data)
            .unwrap();
        let root = tree.node(0);
        // Dimension 0 trims 10 per side of 200 -> 178 left; dimension 1 trims 0
        assert_eq!(root.low[0], Some(10.0));
        assert_eq!(root.high[0], Some(189.0));
        assert_eq!(root.count(), 176);
        assert!(tree
            .observations(0)
            .iter()
            .all(|&i| data.value(i, 0) > 10.0 && data.value(i, 0) < 189.0));
    }

    #[test]
    fn test_bounded_init_validation() {
        let over_trim = PartitionBuilder::new()
            .with_bounded_init(BoundedInit::OrderStatistics(vec![50]))
            .build(&line(100));
        assert!(matches!(over_trim, Err(Error::InvalidParameter(_))));

        let wrong_len = PartitionBuilder::new()
            .with_bounded_init(BoundedInit::OrderStatistics(vec![1, 1]))
            .build(&line(100));
        assert!(matches!(wrong_len, Err(Error::InvalidInput(_))));

        let bad_quantile = BoundedInit::Quantiles(vec![0.5]);
        assert!(bad_quantile.validate(1).is_err());
    }

    #[test]
    fn test_huge_trim_count_is_rejected() {
        let builder = PartitionBuilder::new().with_bounded_init(BoundedInit::OrderStatistics(vec![usize::MAX]));
        assert_eq!(builder.bounded_init(), Some(&BoundedInit::OrderStatistics(vec![usize::MAX])));
        assert!(matches!(builder.build(&line(100)), Err(Error::InvalidParameter(_))));
        assert_eq!(PartitionBuilder::new().bounded_init(), None);
    }
}
