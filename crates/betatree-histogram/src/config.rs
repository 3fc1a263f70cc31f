//! Serializable histogram configuration

use betatree_confidence::LevelMethod;
use betatree_core::{Error, Result};
use betatree_partition::BoundedInit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the exclusion vector of a bounded initialization is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundingOption {
    /// Whole numbers of order statistics dropped per side
    OrderStatistics,
    /// Fractions in `[0, 0.5)` dropped per side
    Quantile,
}

impl fmt::Display for BoundingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderStatistics => write!(f, "order_statistics"),
            Self::Quantile => write!(f, "quantile"),
        }
    }
}

/// Configuration for a Beta-tree histogram fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Simultaneous significance level
    pub alpha: f64,
    /// Level allocation across depths
    pub method: LevelMethod,
    /// Start from a box trimmed out of the data instead of all of ℝᵈ
    pub bounded: bool,
    /// Interpretation of `exclusion`; required when `bounded`
    pub option: Option<BoundingOption>,
    /// One entry per dimension; required when `bounded`
    pub exclusion: Option<Vec<f64>>,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            method: LevelMethod::Weighted,
            bounded: false,
            option: None,
            exclusion: None,
        }
    }
}

impl HistogramConfig {
    /// Check every field that can be checked without the data
    pub fn validate(&self) -> Result<()> {
        Error::check_alpha(self.alpha)?;
        self.bounded_init().map(|_| ())
    }

    /// The partition initialization this configuration asks for.
    ///
    /// `option` and `exclusion` are ignored unless `bounded` is set.
    pub fn bounded_init(&self) -> Result<Option<BoundedInit>> {
        if !self.bounded {
            return Ok(None);
        }
        let (Some(option), Some(exclusion)) = (self.option, self.exclusion.as_ref()) else {
            return Err(Error::InvalidParameter(
                "Bounded initialization requires both an option and an exclusion vector".to_string(),
            ));
        };

        let init = match option {
            BoundingOption::OrderStatistics => {
                let counts = exclusion
                    .iter()
                    .map(|&e| {
                        if e >= 0.0 && e.fract() == 0.0 && e < usize::MAX as f64 {
                            Ok(e as usize)
                        } else {
                            Err(Error::InvalidParameter(format!(
                                "Order statistic exclusion {e} must be a non-negative whole number"
                            )))
                        }
                    })
                    .collect::<Result<Vec<_>>>()?;
                BoundedInit::OrderStatistics(counts)
            }
            BoundingOption::Quantile => {
                if let Some(q) = exclusion.iter().find(|q| !(0.0..0.5).contains(*q)) {
                    return Err(Error::InvalidParameter(format!(
                        "Exclusion quantile {q} must be in [0, 0.5)"
                    )));
                }
                BoundedInit::Quantiles(exclusion.clone())
            }
        };
        Ok(Some(init))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HistogramConfig::default();
        assert_eq!(config.alpha, 0.1);
        assert_eq!(config.method, LevelMethod::Weighted);
        assert!(!config.bounded);
        assert!(config.validate().is_ok());
        assert_eq!(config.bounded_init().unwrap(), None);
    }

    #[test]
    fn test_bounded_requires_option_and_exclusion() {
        let config = HistogramConfig {
            bounded: true,
            option: Some(BoundingOption::Quantile),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));

        let config = HistogramConfig {
            bounded: true,
            exclusion: Some(vec![0.01]),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_unbounded_ignores_exclusion() {
        let config = HistogramConfig {
            option: Some(BoundingOption::Quantile),
            exclusion: Some(vec![0.9]),
            ..Default::default()
        };
        assert_eq!(config.bounded_init().unwrap(), None);
    }

    #[test]
    fn test_exclusion_conversion() {
        let config = HistogramConfig {
            bounded: true,
            option: Some(BoundingOption::OrderStatistics),
            exclusion: Some(vec![0.0, 3.0]),
            ..Default::default()
        };
        assert_eq!(
            config.bounded_init().unwrap(),
            Some(BoundedInit::OrderStatistics(vec![0, 3]))
        );

        let fractional = HistogramConfig {
            exclusion: Some(vec![1.5]),
            ..config.clone()
        };
        assert!(matches!(fractional.validate(), Err(Error::InvalidParameter(_))));

        let quantile = HistogramConfig {
            option: Some(BoundingOption::Quantile),
            exclusion: Some(vec![0.01, 0.5]),
            ..config
        };
        assert!(matches!(quantile.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_unrepresentable_order_statistic_count() {
        for huge in [1e30, f64::INFINITY] {
            let config = HistogramConfig {
                bounded: true,
                option: Some(BoundingOption::OrderStatistics),
                exclusion: Some(vec![huge, 0.0]),
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_bad_alpha() {
        let config = HistogramConfig {
            alpha: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));
    }
}
