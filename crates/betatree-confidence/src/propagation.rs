//! Exact per-region density bounds and their propagation up the tree

use crate::allocation::LevelSchedule;
use betatree_core::math::distributions::beta;
use betatree_core::{ConfidenceInterval, Error, Result};
use betatree_partition::{PartitionTree, RegionId};
use tracing::{debug, instrument, trace};

/// Exact interval for the average density of a region holding `count` of
/// `total` observations in a box of the given volume.
///
/// The probability content of a cell whose boundaries are order statistics
/// follows Beta(count + 1, total − count); its `alpha/2` and `1 − alpha/2`
/// quantiles, divided by the volume, bound the average density.
pub fn exact_bounds(count: usize, total: usize, volume: f64, alpha: f64) -> Result<ConfidenceInterval> {
    Error::check_alpha(alpha)?;
    if count >= total {
        return Err(Error::InvalidInput(format!(
            "region count {count} must be below the dataset size {total}"
        )));
    }
    if !(volume > 0.0 && volume.is_finite()) {
        return Err(Error::InvalidInput(format!("region volume {volume} must be positive")));
    }

    let a = count as f64 + 1.0;
    let b = (total - count) as f64;
    let lower = beta::inverse_regularized(alpha / 2.0, a, b)?;
    let upper = beta::inverse_regularized(1.0 - alpha / 2.0, a, b)?;
    Ok(ConfidenceInterval::new(lower / volume, upper / volume, alpha))
}

/// Bounds attached to one annotated region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBounds {
    /// The region's own exact interval at its depth's level
    pub own: ConfidenceInterval,
    /// Intersection of `own` with both children's propagated intervals
    pub propagated: ConfidenceInterval,
}

/// Region id → bounds, built alongside an immutable [`PartitionTree`].
///
/// Unbounded regions, and bounded regions that cannot carry a density
/// interval (zero volume), have no entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundAnnotations {
    entries: Vec<Option<RegionBounds>>,
}

impl BoundAnnotations {
    /// Bounds for a region
    pub fn get(&self, id: RegionId) -> Option<&RegionBounds> {
        self.entries.get(id).and_then(Option::as_ref)
    }

    /// The region's own exact interval
    pub fn own(&self, id: RegionId) -> Option<ConfidenceInterval> {
        self.get(id).map(|b| b.own)
    }

    /// The region's propagated interval
    pub fn propagated(&self, id: RegionId) -> Option<ConfidenceInterval> {
        self.get(id).map(|b| b.propagated)
    }

    /// Number of annotated regions
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Check if no region is annotated
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Annotate every bounded region with its exact interval and the
/// intersection of that interval with its children's propagated intervals.
///
/// Ids grow in pre-order, so walking them backwards visits both children
/// before their parent.
#[instrument(skip(tree, schedule), fields(regions = tree.len(), n = tree.total_count()))]
pub fn propagate(tree: &PartitionTree, schedule: &LevelSchedule) -> Result<BoundAnnotations> {
    let total = tree.total_count();
    let mut entries: Vec<Option<RegionBounds>> = vec![None; tree.len()];

    for (id, node) in tree.iter().rev() {
        if !node.is_bounded() {
            continue;
        }
        let alpha = schedule.alpha_at(node.depth).ok_or_else(|| {
            Error::InvalidInput(format!("schedule has no level for depth {}", node.depth))
        })?;
        let volume = node.volume().unwrap_or(0.0);
        if volume <= 0.0 || node.count() >= total {
            debug!(id, depth = node.depth, volume, count = node.count(), "region cannot carry a density interval");
            continue;
        }

        let own = exact_bounds(node.count(), total, volume, alpha)?;
        let mut propagated = own;
        if let Some((left, right)) = tree.children(id) {
            for child in [left, right] {
                if let Some(bounds) = &entries[child] {
                    propagated = propagated.intersect(&bounds.propagated);
                }
            }
        }
        trace!(id, depth = node.depth, lower = propagated.lower, upper = propagated.upper);
        entries[id] = Some(RegionBounds { own, propagated });
    }

    let annotations = BoundAnnotations { entries };
    debug!(annotated = annotations.len(), "bounds propagated");
    Ok(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_bounds_bracket_the_mean() {
        let ci = exact_bounds(50, 1000, 0.5, 0.05).unwrap();
        // Beta(51, 950) has mean 51/1001
        let mean = 51.0 / 1001.0 / 0.5;
        assert!(ci.lower < mean && mean < ci.upper);
        assert_eq!(ci.alpha, 0.05);
    }

    #[test]
    fn test_exact_bounds_scale_with_volume() {
        let unit = exact_bounds(10, 200, 1.0, 0.1).unwrap();
        let quarter = exact_bounds(10, 200, 0.25, 0.1).unwrap();
        assert_relative_eq!(quarter.lower, 4.0 * unit.lower, max_relative = 1e-12);
        assert_relative_eq!(quarter.upper, 4.0 * unit.upper, max_relative = 1e-12);
    }

    #[test]
    fn test_exact_bounds_tighten_with_larger_alpha() {
        let strict = exact_bounds(30, 500, 1.0, 1e-6).unwrap();
        let loose = exact_bounds(30, 500, 1.0, 0.2).unwrap();
        assert!(strict.lower < loose.lower);
        assert!(strict.upper > loose.upper);
    }

    #[test]
    fn test_exact_bounds_reject_degenerate_regions() {
        assert!(exact_bounds(10, 10, 1.0, 0.1).is_err());
        assert!(exact_bounds(1, 10, 0.0, 0.1).is_err());
    }
}
