//! Mathematical utilities for Beta-tree inference
//!
//! This module provides the special-function plumbing needed by the
//! confidence crates, on top of the regularized incomplete Beta function
//! shipped by `statrs`.

/// Distribution-related mathematical functions
pub mod distributions {
    /// Beta distribution utilities
    pub mod beta {
        use crate::{Error, Result};
        use statrs::function::beta::{checked_beta_reg, checked_ln_beta};

        const MAX_ITERATIONS: usize = 400;
        const RELATIVE_TOLERANCE: f64 = 1e-14;

        /// Regularized incomplete Beta function I_x(a, b)
        pub fn regularized(x: f64, a: f64, b: f64) -> Result<f64> {
            checked_beta_reg(a, b, x.clamp(0.0, 1.0)).map_err(|e| {
                Error::Computation(format!("Incomplete beta I_{x}({a}, {b}) failed: {e}"))
            })
        }

        /// Density of Beta(a, b) at `x`, given `ln B(a, b)`
        fn pdf_with_ln_beta(x: f64, a: f64, b: f64, ln_beta: f64) -> f64 {
            if x <= 0.0 || x >= 1.0 {
                return 0.0;
            }
            let left = if a == 1.0 { 0.0 } else { (a - 1.0) * x.ln() };
            let right = if b == 1.0 { 0.0 } else { (b - 1.0) * (-x).ln_1p() };
            (left + right - ln_beta).exp()
        }

        /// Density of Beta(a, b) at `x`
        pub fn pdf(x: f64, a: f64, b: f64) -> Result<f64> {
            let ln_beta = checked_ln_beta(a, b).map_err(|e| {
                Error::Computation(format!("ln B({a}, {b}) failed: {e}"))
            })?;
            Ok(pdf_with_ln_beta(x, a, b, ln_beta))
        }

        /// Inverse of the regularized incomplete Beta function.
        ///
        /// Returns the `x` in `[0, 1]` with `I_x(a, b) = p`, i.e. the
        /// `p`-quantile of a Beta(a, b) distribution.
        ///
        /// Newton steps are taken on a shrinking bracket; a step that leaves
        /// the bracket, or a vanishing density, falls back to bisection. The
        /// loop stops once the step is below a relative tolerance, which
        /// keeps far-tail quantiles (tiny `p`) accurate as well.
        pub fn inverse_regularized(p: f64, a: f64, b: f64) -> Result<f64> {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidParameter(format!(
                    "Probability {p} must be in [0, 1]"
                )));
            }
            let ln_beta = checked_ln_beta(a, b).map_err(|e| {
                Error::Computation(format!("Beta({a}, {b}) has invalid shape: {e}"))
            })?;
            if p == 0.0 {
                return Ok(0.0);
            }
            if p == 1.0 {
                return Ok(1.0);
            }

            let mut lo = 0.0_f64;
            let mut hi = 1.0_f64;
            let mut x = a / (a + b);

            for _ in 0..MAX_ITERATIONS {
                let f = regularized(x, a, b)? - p;
                if f == 0.0 {
                    return Ok(x);
                }
                if f < 0.0 {
                    lo = x;
                } else {
                    hi = x;
                }

                let density = pdf_with_ln_beta(x, a, b, ln_beta);
                let newton = x - f / density;
                let next = if density > 0.0 && newton.is_finite() && newton > lo && newton < hi {
                    newton
                } else {
                    0.5 * (lo + hi)
                };

                if (next - x).abs() <= RELATIVE_TOLERANCE * next.abs()
                    || hi - lo <= RELATIVE_TOLERANCE * lo
                {
                    return Ok(next);
                }
                x = next;
            }

            Ok(x)
        }

    }
}
