//! Beta-tree histograms for multivariate data
//!
//! A Beta-tree histogram summarizes a sample of n points in ℝᵈ by a set of
//! axis-aligned boxes. Each box carries its smoothed empirical density
//! `(count + 1) / (n · volume)` and an exact Beta-based confidence interval
//! for the average density over the box. All intervals hold simultaneously
//! with probability at least 1 − α.
//!
//! The pipeline has four stages:
//!
//! 1. median partitioning of the sample space ([`betatree_partition`])
//! 2. allocation of α across tree depths ([`betatree_confidence::allocate`])
//! 3. bottom-up propagation of exact bounds ([`betatree_confidence::propagate`])
//! 4. top-down selection of the largest consistent regions ([`select`])
//!
//! # Examples
//!
//! ```rust
//! use betatree_core::DataMatrix;
//! use betatree_histogram::{BetaTreeBuilder, BoundingOption, LevelMethod};
//!
//! let rows: Vec<Vec<f64>> = (0..500)
//!     .map(|i| vec![(i % 25) as f64 + 0.5, (i / 25) as f64 + 0.25])
//!     .collect();
//! let data = DataMatrix::from_rows(&rows).unwrap();
//!
//! let histogram = BetaTreeBuilder::new()
//!     .alpha(0.1)
//!     .method(LevelMethod::Weighted)
//!     .bounded(BoundingOption::OrderStatistics, vec![0.0, 0.0])
//!     .build()
//!     .unwrap()
//!     .fit(&data)
//!     .unwrap();
//!
//! for region in histogram.regions() {
//!     assert!(region.ci_lower() <= region.density && region.density <= region.ci_upper());
//! }
//! assert_eq!(histogram.column_names().len(), 2 * 2 + 5);
//! ```
//!
//! Configurations can also be loaded from any serde format:
//!
//! ```rust
//! use betatree_histogram::HistogramConfig;
//!
//! let config: HistogramConfig = serde_json::from_str(
//!     r#"{ "alpha": 0.05, "method": "plain" }"#,
//! ).unwrap();
//! assert!(!config.bounded);
//! ```

mod builder;
mod config;
mod select;
mod types;

pub use builder::{beta_tree_histogram, BetaTreeBuilder, BetaTreeHistogram};
pub use config::{BoundingOption, HistogramConfig};
pub use select::select;
pub use types::{column_names, BetaHistogram, SelectedRegion, VALUE_COLUMNS};

pub use betatree_confidence::LevelMethod;
