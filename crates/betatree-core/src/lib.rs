//! Core types for Beta-tree histograms
//!
//! This crate provides the foundation shared by the partition, confidence,
//! histogram and modality crates:
//!
//! - [`Error`] / [`Result`]: the unified error type
//! - [`DataMatrix`]: the n×d observation matrix every stage consumes
//! - [`ConfidenceInterval`]: a density interval attached to a region
//! - [`math`]: special functions, notably the inverse regularized incomplete
//!   Beta function used for exact region bounds
//!
//! # Example
//!
//! ```rust
//! use betatree_core::{math::distributions::beta, DataMatrix};
//!
//! let data = DataMatrix::from_rows(&[vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
//! assert_eq!(data.n_dims(), 2);
//!
//! // 5% quantile of Beta(3, 10)
//! let q = beta::inverse_regularized(0.05, 3.0, 10.0).unwrap();
//! assert!(q > 0.0 && q < 3.0 / 13.0);
//! ```

pub mod error;
pub mod interval;
pub mod math;
pub mod matrix;

pub use error::{Error, Result};
pub use interval::ConfidenceInterval;
pub use matrix::DataMatrix;
