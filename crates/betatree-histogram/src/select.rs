//! Maximal-region selection

use crate::types::SelectedRegion;
use betatree_confidence::BoundAnnotations;
use betatree_partition::PartitionTree;
use tracing::{debug, trace};

/// Walk the tree top-down and keep the largest regions whose smoothed
/// density `(count + 1) / (n · volume)` lies inside their propagated
/// interval. A kept region is not descended into; a rejected or
/// unannotated region hands over to its children. Unannotated leaves
/// contribute nothing.
///
/// The emitted interval is the region's own exact interval, which always
/// contains the propagated one. Regions come out in pre-order.
pub fn select(tree: &PartitionTree, annotations: &BoundAnnotations) -> Vec<SelectedRegion> {
    let n = tree.total_count() as f64;
    let mut regions = Vec::new();
    let mut stack = vec![tree.root()];

    while let Some(id) = stack.pop() {
        let node = tree.node(id);
        if let (Some(bounds), Some(volume), Some((lower, upper))) =
            (annotations.get(id), node.volume(), node.corners())
        {
            let density = (node.count() as f64 + 1.0) / (n * volume);
            if bounds.propagated.contains(density) {
                trace!(id, depth = node.depth, density, "region selected");
                regions.push(SelectedRegion::new(
                    lower,
                    upper,
                    density,
                    bounds.own,
                    node.count(),
                    node.depth,
                ));
                continue;
            }
        }
        if let Some((left, right)) = tree.children(id) {
            stack.push(right);
            stack.push(left);
        }
    }

    debug!(selected = regions.len(), "regions selected");
    regions
}
