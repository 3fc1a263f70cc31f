//! Recursive median partitioning for Beta-tree histograms
//!
//! Grows a k-d-tree-like hierarchy of axis-aligned regions from raw
//! observations. Each split happens at the sample median of the region in
//! the coordinate `depth mod d`; the median observation becomes a region
//! boundary and is removed from both children, so region boundaries are
//! order statistics of the data.
//!
//! The builder returns the tree together with its [`DepthCensus`], the
//! number of bounded regions per depth, which drives the significance level
//! allocation downstream.
//!
//! # Example
//!
//! ```rust
//! use betatree_core::DataMatrix;
//! use betatree_partition::{BoundedInit, PartitionBuilder};
//!
//! let rows: Vec<Vec<f64>> = (0..500)
//!     .map(|i| vec![(i as f64 * 0.37).sin(), (i as f64 * 0.11).cos()])
//!     .collect();
//! let data = DataMatrix::from_rows(&rows).unwrap();
//!
//! let tree = PartitionBuilder::new()
//!     .with_bounded_init(BoundedInit::OrderStatistics(vec![1, 1]))
//!     .build(&data)
//!     .unwrap();
//!
//! assert!(tree.node(tree.root()).is_bounded());
//! assert_eq!(tree.census().min_depth(), Some(0));
//! ```

pub mod builder;
pub mod census;
pub mod tree;

pub use builder::{leaf_threshold, BoundedInit, PartitionBuilder};
pub use census::DepthCensus;
pub use tree::{PartitionTree, RegionId, RegionNode, Split};
