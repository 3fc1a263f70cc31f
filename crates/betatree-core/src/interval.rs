//! Confidence interval for the average density of a region

use serde::{Deserialize, Serialize};
use std::fmt;

/// A density confidence interval with lower and upper bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// Two-sided significance level the interval was computed at
    pub alpha: f64,
}

impl ConfidenceInterval {
    /// Create a new confidence interval
    pub fn new(lower: f64, upper: f64, alpha: f64) -> Self {
        Self { lower, upper, alpha }
    }

    /// Width of the confidence interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if a value is contained in the closed interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Check if intervals overlap
    pub fn overlaps(&self, other: &ConfidenceInterval) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }

    /// Tighten this interval by another one.
    ///
    /// The result may be empty (`lower > upper`) when the two intervals are
    /// disjoint; callers compare densities against it and never read a width.
    pub fn intersect(&self, other: &ConfidenceInterval) -> Self {
        Self {
            lower: self.lower.max(other.lower),
            upper: self.upper.min(other.upper),
            alpha: self.alpha,
        }
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6}, {:.6}] (alpha={:.3e})", self.lower, self.upper, self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_closed() {
        let ci = ConfidenceInterval::new(1.0, 2.0, 0.05);
        assert!(ci.contains(1.0));
        assert!(ci.contains(2.0));
        assert!(!ci.contains(2.0001));
        assert_eq!(ci.width(), 1.0);
    }

    #[test]
    fn test_intersect_and_overlap() {
        let a = ConfidenceInterval::new(1.0, 4.0, 0.01);
        let b = ConfidenceInterval::new(2.0, 5.0, 0.02);
        let c = a.intersect(&b);
        assert_eq!((c.lower, c.upper), (2.0, 4.0));
        assert_eq!(c.alpha, 0.01);
        assert!(a.overlaps(&b));

        let far = ConfidenceInterval::new(10.0, 11.0, 0.01);
        assert!(!a.overlaps(&far));
        let empty = a.intersect(&far);
        assert!(empty.lower > empty.upper);
    }
}
