//! Core types for Beta-tree histogram output

use betatree_confidence::{LevelMethod, LevelSchedule};
use betatree_core::ConfidenceInterval;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed names of the trailing (non-bound) output columns
pub const VALUE_COLUMNS: [&str; 5] = ["density", "ci_lower", "ci_upper", "count", "depth"];

/// A region kept by the selector: a bounded box, its smoothed empirical
/// density and its exact density interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedRegion {
    /// Lower corner, one entry per dimension
    pub lower: Vec<f64>,
    /// Upper corner, one entry per dimension
    pub upper: Vec<f64>,
    /// (count + 1) / (n · volume)
    pub density: f64,
    /// The region's own exact interval at its depth's level
    pub interval: ConfidenceInterval,
    /// Observations strictly inside the region
    pub count: usize,
    /// Depth of the region in the partition tree
    pub depth: usize,
}

impl SelectedRegion {
    /// Create a new region record
    pub fn new(
        lower: Vec<f64>,
        upper: Vec<f64>,
        density: f64,
        interval: ConfidenceInterval,
        count: usize,
        depth: usize,
    ) -> Self {
        Self {
            lower,
            upper,
            density,
            interval,
            count,
            depth,
        }
    }

    /// Dimension of the box
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Lower end of the density interval
    pub fn ci_lower(&self) -> f64 {
        self.interval.lower
    }

    /// Upper end of the density interval
    pub fn ci_upper(&self) -> f64 {
        self.interval.upper
    }

    /// Product of the side lengths
    pub fn volume(&self) -> f64 {
        self.lower.iter().zip(&self.upper).map(|(lo, hi)| hi - lo).product()
    }

    /// Check if a point lies in the closed box
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dimension()
            && point
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&x, (&lo, &hi))| x >= lo && x <= hi)
    }

    /// Check if two closed boxes intersect in every dimension; touching
    /// faces or corners count
    pub fn touches(&self, other: &SelectedRegion) -> bool {
        self.lower
            .iter()
            .zip(&self.upper)
            .zip(other.lower.iter().zip(&other.upper))
            .all(|((&lo_a, &hi_a), (&lo_b, &hi_b))| lo_a <= hi_b && lo_b <= hi_a)
    }

    /// The region as `2d + 5` numbers: lower corner, upper corner, density,
    /// interval lower, interval upper, count, depth
    pub fn to_row(&self) -> Vec<f64> {
        let mut row = Vec::with_capacity(2 * self.dimension() + VALUE_COLUMNS.len());
        row.extend_from_slice(&self.lower);
        row.extend_from_slice(&self.upper);
        row.extend([
            self.density,
            self.interval.lower,
            self.interval.upper,
            self.count as f64,
            self.depth as f64,
        ]);
        row
    }
}

impl fmt::Display for SelectedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region(lower={:?}, upper={:?}, density={:.4}, ci=[{:.4}, {:.4}], count={}, depth={})",
            self.lower,
            self.upper,
            self.density,
            self.interval.lower,
            self.interval.upper,
            self.count,
            self.depth
        )
    }
}

/// Column names of [`SelectedRegion::to_row`] for a `dims`-dimensional table
pub fn column_names(dims: usize) -> Vec<String> {
    (1..=dims)
        .map(|p| format!("lower_{p}"))
        .chain((1..=dims).map(|p| format!("upper_{p}")))
        .chain(VALUE_COLUMNS.iter().map(|c| c.to_string()))
        .collect()
}

/// A fitted Beta-tree histogram
#[derive(Debug, Clone, PartialEq)]
pub struct BetaHistogram {
    regions: Vec<SelectedRegion>,
    total_count: usize,
    dims: usize,
    alpha: f64,
    method: LevelMethod,
    schedule: Option<LevelSchedule>,
}

impl BetaHistogram {
    /// Create a histogram from selected regions
    pub fn new(
        regions: Vec<SelectedRegion>,
        total_count: usize,
        dims: usize,
        schedule: LevelSchedule,
    ) -> Self {
        Self {
            regions,
            total_count,
            dims,
            alpha: schedule.alpha(),
            method: schedule.method(),
            schedule: Some(schedule),
        }
    }

    /// A histogram without regions, for trees that never closed a bound
    pub fn empty(total_count: usize, dims: usize, alpha: f64, method: LevelMethod) -> Self {
        Self {
            regions: Vec::new(),
            total_count,
            dims,
            alpha,
            method,
            schedule: None,
        }
    }

    /// Selected regions in traversal order
    pub fn regions(&self) -> &[SelectedRegion] {
        &self.regions
    }

    /// Consume the histogram, keeping its regions
    pub fn into_regions(self) -> Vec<SelectedRegion> {
        self.regions
    }

    /// Number of regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Check if no region was selected
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Size of the dataset the histogram was fitted on
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Dimension of the sample space
    pub fn dimension(&self) -> usize {
        self.dims
    }

    /// Simultaneous significance level
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Level allocation method
    pub fn method(&self) -> LevelMethod {
        self.method
    }

    /// Per-depth levels, `None` for an empty histogram
    pub fn schedule(&self) -> Option<&LevelSchedule> {
        self.schedule.as_ref()
    }

    /// The region table, one `2d + 5` row per region
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.regions.iter().map(SelectedRegion::to_row).collect()
    }

    /// Names of the columns of [`BetaHistogram::rows`]
    pub fn column_names(&self) -> Vec<String> {
        column_names(self.dims)
    }

    /// First region whose closed box contains the point
    pub fn find_region(&self, point: &[f64]) -> Option<usize> {
        self.regions.iter().position(|r| r.contains(point))
    }

    /// Largest region density, `None` when empty
    pub fn max_density(&self) -> Option<f64> {
        self.regions.iter().map(|r| r.density).reduce(f64::max)
    }

    /// Smallest region density, `None` when empty
    pub fn min_density(&self) -> Option<f64> {
        self.regions.iter().map(|r| r.density).reduce(f64::min)
    }
}

impl fmt::Display for BetaHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BetaHistogram({} regions, n={}, d={}, alpha={}, method={})",
            self.len(),
            self.total_count,
            self.dims,
            self.alpha,
            self.method
        )
    }
}
