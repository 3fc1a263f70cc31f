//! Multivariate Beta-tree histograms
//!
//! Facade over the betatree workspace crates. The data matrix, error type
//! and interval type of `betatree-core` are re-exported at the top level;
//! the pipeline stages are also available as modules:
//!
//! - [`partition`]: recursive median partitioning of the sample space
//! - [`confidence`]: significance level allocation and exact bound propagation
//! - [`histogram`]: maximal region selection and the fitting pipeline
//! - [`modality`]: region adjacency graph and mode finding
//!
//! # Example
//!
//! ```rust
//! use betatree::{find_modes, BetaTreeBuilder, DataMatrix, LevelMethod};
//!
//! let rows: Vec<Vec<f64>> = (0..1000)
//!     .map(|i| {
//!         let t = i as f64 / 1000.0;
//!         let shift = if i % 2 == 0 { 0.0 } else { 10.0 };
//!         vec![shift + (t * 7919.0).fract(), shift + (t * 104729.0).fract()]
//!     })
//!     .collect();
//! let data = DataMatrix::from_rows(&rows)?;
//!
//! let histogram = BetaTreeBuilder::new()
//!     .alpha(0.1)
//!     .method(LevelMethod::Weighted)
//!     .build()?
//!     .fit(&data)?;
//! for row in histogram.rows() {
//!     assert_eq!(row.len(), 2 * 2 + 5);
//! }
//!
//! let modes = find_modes(histogram.regions(), 10)?;
//! println!("{histogram}: {modes}");
//! # Ok::<(), betatree::Error>(())
//! ```

pub use betatree_confidence as confidence;
pub use betatree_histogram as histogram;
pub use betatree_modality as modality;
pub use betatree_partition as partition;

pub use betatree_confidence::{allocate, propagate, BoundAnnotations, LevelMethod, LevelSchedule};
pub use betatree_core::{ConfidenceInterval, DataMatrix, Error, Result};
pub use betatree_histogram::{
    beta_tree_histogram, select, BetaHistogram, BetaTreeBuilder, BetaTreeHistogram,
    BoundingOption, HistogramConfig, SelectedRegion,
};
pub use betatree_modality::{
    adjacency, find_modes, ModalityResult, ModeFinder, ModeFinderBuilder, RegionGraph,
};
pub use betatree_partition::{BoundedInit, DepthCensus, PartitionBuilder, PartitionTree};
