use crate::graph::RegionGraph;
use crate::paths::SimplePaths;
use crate::types::ModalityResult;
use betatree_core::{Error, Result};
use betatree_histogram::SelectedRegion;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use tracing::{debug, instrument, trace};

/// Mode finder over the region adjacency graph.
///
/// Regions are visited by decreasing density. A region becomes a new mode
/// unless it is absorbed by an existing one, which happens when the two are
/// adjacent or when some path of at most `cutoff` edges joins them without
/// passing through a dip. A region R on the path is a dip when its upper
/// density bound lies strictly below the lower bounds of both endpoints.
/// Regions with no connecting path at all are always separate modes.
///
/// The cutoff bounds the path search, which is exponential in the worst
/// case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFinder {
    cutoff: usize,
}

impl ModeFinder {
    /// Creates a mode finder searching paths of at most `cutoff` edges.
    pub fn new(cutoff: usize) -> Result<Self> {
        if cutoff == 0 {
            return Err(Error::InvalidParameter(
                "Path cutoff must be at least one edge".to_string(),
            ));
        }
        Ok(Self { cutoff })
    }

    /// Maximum path length, in edges
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Find the modes of a list of selected regions.
    #[instrument(skip(self, regions), fields(regions = regions.len(), cutoff = self.cutoff))]
    pub fn find_modes(&self, regions: &[SelectedRegion]) -> Result<ModalityResult> {
        let graph = RegionGraph::from_regions(regions);

        // Stable sort: equal densities keep their region order
        let mut order: Vec<usize> = (0..regions.len()).collect();
        order.sort_by_key(|&i| Reverse(OrderedFloat(regions[i].density)));

        let mut modes: Vec<usize> = Vec::new();
        let mut assignment = vec![0; regions.len()];
        for &candidate in &order {
            let owner = modes
                .iter()
                .copied()
                .find(|&mode| !self.is_separated(&graph, regions, candidate, mode));
            match owner {
                Some(mode) => {
                    trace!(candidate, mode, "region absorbed");
                    assignment[candidate] = mode;
                }
                None => {
                    trace!(candidate, density = regions[candidate].density, "new mode");
                    assignment[candidate] = candidate;
                    modes.push(candidate);
                }
            }
        }

        debug!(
            modes = modes.len(),
            edges = graph.edge_count(),
            components = graph.components().len(),
            "modes found"
        );
        Ok(ModalityResult::new(modes, assignment, graph))
    }

    /// Two non-adjacent regions are separated when every short path between
    /// them crosses a dip
    fn is_separated(
        &self,
        graph: &RegionGraph,
        regions: &[SelectedRegion],
        a: usize,
        b: usize,
    ) -> bool {
        if graph.is_adjacent(a, b) {
            return false;
        }
        let floor = regions[a].ci_lower().min(regions[b].ci_lower());
        SimplePaths::new(graph, a, b, self.cutoff)
            .through(|r| regions[r].ci_upper() >= floor)
            .next()
            .is_none()
    }
}
