//! Distribution of the overall significance level across tree depths

use betatree_core::{Error, Result};
use betatree_partition::DepthCensus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Multiple-testing correction used to split α across depths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelMethod {
    /// Bonferroni: every populated depth receives the same share of α
    Plain,
    /// Weighted Bonferroni: depth D receives a share of α proportional to
    /// `1 / (D_max − D + 2)`
    #[default]
    Weighted,
}

impl LevelMethod {
    /// Name of the method
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Weighted => "weighted",
        }
    }
}

impl fmt::Display for LevelMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-depth significance levels α_D.
///
/// Only depths holding bounded regions have a level; every other depth is
/// absent and [`LevelSchedule::alpha_at`] returns `None` for it.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSchedule {
    alpha: f64,
    method: LevelMethod,
    levels: BTreeMap<usize, f64>,
}

impl LevelSchedule {
    /// Overall significance level the schedule splits
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Correction method used
    pub fn method(&self) -> LevelMethod {
        self.method
    }

    /// α_D for a depth, `None` for depths without bounded regions
    pub fn alpha_at(&self, depth: usize) -> Option<f64> {
        self.levels.get(&depth).copied()
    }

    /// `(depth, α_D)` pairs in increasing depth order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.levels.iter().map(|(&d, &a)| (d, a))
    }

    /// Number of depths with a level
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if the schedule is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Σ α_D · N_D over a census; equals [`LevelSchedule::alpha`] for the
    /// census the schedule was allocated from
    pub fn spent(&self, census: &DepthCensus) -> f64 {
        census
            .iter()
            .filter_map(|(depth, count)| Some(self.alpha_at(depth)? * count as f64))
            .sum()
    }
}

/// Split `alpha` across the populated depths of `census`.
///
/// With L populated depths and N_D bounded regions at depth D:
///
/// - `Plain`: α_D = α / (L · N_D)
/// - `Weighted`: α_D = α / ((D_max − D + 2) · N_D · W), W = Σ_{B=2}^{L+1} 1/B
///
/// Both give Σ α_D · N_D = α. Populated depths from a partition tree are
/// contiguous; for a census with gaps the rank among populated depths
/// stands in for `D_max − D`.
pub fn allocate(census: &DepthCensus, alpha: f64, method: LevelMethod) -> Result<LevelSchedule> {
    Error::check_alpha(alpha)?;
    if census.is_empty() {
        return Err(Error::NoBoundedRegions);
    }

    let span = census.len();
    let levels: BTreeMap<usize, f64> = match method {
        LevelMethod::Plain => census
            .iter()
            .map(|(depth, count)| (depth, alpha / (span as f64 * count as f64)))
            .collect(),
        LevelMethod::Weighted => {
            let weight: f64 = (2..=span + 1).map(|b| 1.0 / b as f64).sum();
            census
                .iter()
                .rev()
                .enumerate()
                .map(|(rank, (depth, count))| {
                    (depth, alpha / ((rank + 2) as f64 * count as f64 * weight))
                })
                .collect()
        }
    };

    debug!(
        %method,
        alpha,
        depths = span,
        min_depth = census.min_depth(),
        max_depth = census.max_depth(),
        "significance levels allocated"
    );

    Ok(LevelSchedule { alpha, method, levels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plain_levels() {
        let census = DepthCensus::from_counts([(2, 1), (3, 2), (4, 4)]);
        let schedule = allocate(&census, 0.3, LevelMethod::Plain).unwrap();
        assert_relative_eq!(schedule.alpha_at(2).unwrap(), 0.1);
        assert_relative_eq!(schedule.alpha_at(3).unwrap(), 0.05);
        assert_relative_eq!(schedule.alpha_at(4).unwrap(), 0.025);
        assert_eq!(schedule.alpha_at(1), None);
        assert_relative_eq!(schedule.spent(&census), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_weighted_levels() {
        // D_min = 2, D_max = 4: W = 1/2 + 1/3 + 1/4 = 13/12
        let census = DepthCensus::from_counts([(2, 1), (3, 2), (4, 4)]);
        let schedule = allocate(&census, 0.1, LevelMethod::Weighted).unwrap();
        let w = 13.0 / 12.0;
        assert_relative_eq!(schedule.alpha_at(4).unwrap(), 0.1 / (2.0 * 4.0 * w));
        assert_relative_eq!(schedule.alpha_at(3).unwrap(), 0.1 / (3.0 * 2.0 * w));
        assert_relative_eq!(schedule.alpha_at(2).unwrap(), 0.1 / (4.0 * 1.0 * w));
        assert_relative_eq!(schedule.spent(&census), 0.1, epsilon = 1e-12);
        assert_eq!(schedule.method(), LevelMethod::Weighted);
    }

    #[test]
    fn test_single_depth_gets_whole_budget() {
        let census = DepthCensus::from_counts([(5, 10)]);
        for method in [LevelMethod::Plain, LevelMethod::Weighted] {
            let schedule = allocate(&census, 0.2, method).unwrap();
            assert_relative_eq!(schedule.alpha_at(5).unwrap(), 0.02, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_empty_census_and_bad_alpha() {
        let err = allocate(&DepthCensus::new(), 0.1, LevelMethod::Plain).unwrap_err();
        assert!(err.is_no_bounded_regions());

        let census = DepthCensus::from_counts([(1, 1)]);
        assert!(matches!(
            allocate(&census, 1.0, LevelMethod::Plain),
            Err(Error::InvalidParameter(_))
        ));
    }
}
