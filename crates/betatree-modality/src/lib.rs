//! Mode finding on Beta-tree histograms
//!
//! The regions selected by a Beta-tree histogram form a graph in which two
//! regions are joined when their closed boxes touch. A mode is a region that
//! is a local maximum of density: it is kept apart from every denser mode by
//! a dip, a region whose upper density bound lies below the lower bounds of
//! both, on every short path between them.
//!
//! # Algorithm Overview
//!
//! 1. Build the adjacency graph of the regions ([`RegionGraph`])
//! 2. Visit regions by decreasing density, seeding the mode set with the densest
//! 3. Absorb a region into the first mode it is adjacent to or joined with by
//!    a dip-free path of at most `cutoff` edges ([`SimplePaths`])
//! 4. Otherwise the region becomes a new mode
//!
//! # Examples
//!
//! ```rust
//! use betatree_core::ConfidenceInterval;
//! use betatree_histogram::SelectedRegion;
//! use betatree_modality::find_modes;
//!
//! let region = |lo: f64, density: f64, ci: (f64, f64)| {
//!     SelectedRegion::new(
//!         vec![lo],
//!         vec![lo + 1.0],
//!         density,
//!         ConfidenceInterval::new(ci.0, ci.1, 0.01),
//!         20,
//!         4,
//!     )
//! };
//!
//! // Two bumps joined through a clear dip
//! let regions = vec![
//!     region(0.0, 0.15, (0.1, 0.2)),
//!     region(1.0, 0.03, (0.01, 0.05)),
//!     region(2.0, 5.5, (5.0, 6.0)),
//! ];
//! let result = find_modes(&regions, 5).unwrap();
//! assert_eq!(result.modes(), &[2, 0]);
//! assert_eq!(result.assignment(1), Some(2));
//! ```
//!
//! Fitting and mode finding together:
//!
//! ```rust
//! use betatree_histogram::BetaTreeBuilder;
//! use betatree_modality::ModeFinderBuilder;
//! # #[cfg(feature = "test-utils")]
//! # {
//! use betatree_modality::test_data::TestDistributions;
//!
//! let histogram = BetaTreeBuilder::new()
//!     .build()
//!     .unwrap()
//!     .fit(&TestDistributions::bimodal_2d())
//!     .unwrap();
//! let finder = ModeFinderBuilder::new().cutoff(histogram.len()).build().unwrap();
//! let result = finder.find_modes(histogram.regions()).unwrap();
//! println!("{result}");
//! # }
//! ```

pub mod builder;
pub mod detector;
pub mod graph;
pub mod paths;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_data;

pub use builder::ModeFinderBuilder;
pub use detector::ModeFinder;
pub use graph::RegionGraph;
pub use paths::SimplePaths;
pub use types::ModalityResult;

use betatree_core::Result;
use betatree_histogram::SelectedRegion;

/// Symmetric 0/1 adjacency matrix of the regions' closed boxes
pub fn adjacency(regions: &[SelectedRegion]) -> Vec<Vec<u8>> {
    RegionGraph::from_regions(regions).to_matrix()
}

/// Find modes with a path cutoff of `cutoff` edges
pub fn find_modes(regions: &[SelectedRegion], cutoff: usize) -> Result<ModalityResult> {
    ModeFinder::new(cutoff)?.find_modes(regions)
}
