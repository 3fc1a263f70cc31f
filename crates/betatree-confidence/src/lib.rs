//! Simultaneous confidence bounds for Beta-tree regions
//!
//! Two steps turn a [`PartitionTree`](betatree_partition::PartitionTree)
//! into an annotated tree:
//!
//! 1. [`allocate`] splits the overall significance level α across the depths
//!    holding bounded regions (plain or weighted Bonferroni), so that
//!    Σ α_D · N_D = α and all region intervals hold jointly with probability
//!    at least 1 − α.
//! 2. [`propagate`] computes each bounded region's exact Beta interval at its
//!    depth's level and intersects it with its children's intervals, bottom-up.
//!
//! # Example
//!
//! ```rust
//! use betatree_confidence::{allocate, propagate, LevelMethod};
//! use betatree_core::DataMatrix;
//! use betatree_partition::PartitionBuilder;
//!
//! let values: Vec<f64> = (0..400).map(|i| ((i * 7919) % 400) as f64 / 400.0).collect();
//! let data = DataMatrix::from_row_major(values, 1).unwrap();
//! let tree = PartitionBuilder::new().build(&data).unwrap();
//!
//! let schedule = allocate(tree.census(), 0.1, LevelMethod::Weighted).unwrap();
//! let bounds = propagate(&tree, &schedule).unwrap();
//! assert!(!bounds.is_empty());
//! ```

mod allocation;
mod propagation;

pub use allocation::{allocate, LevelMethod, LevelSchedule};
pub use propagation::{exact_bounds, propagate, BoundAnnotations, RegionBounds};
