//! Test data generators for mode finding
//!
//! Seeded point clouds so that mode finding tests run on reproducible
//! histograms.

use betatree_core::DataMatrix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

/// Standard test point clouds for mode finding
pub struct TestDistributions;

impl TestDistributions {
    /// A single round bump
    ///
    /// Returns 2000 samples from N(0, I) in two dimensions
    pub fn unimodal_normal_2d() -> DataMatrix {
        mixture_normal_2d(&[(0.0, 0.0)], &[1.0], &[1.0], 2000, 42)
    }

    /// Two well separated bumps of different spread
    ///
    /// Returns 4000 samples: 2000 from N((-4, -4), I) and 2000 from
    /// N((4, 4), 0.5² I)
    pub fn bimodal_2d() -> DataMatrix {
        mixture_normal_2d(&[(-4.0, -4.0), (4.0, 4.0)], &[1.0, 0.5], &[1.0, 1.0], 4000, 42)
    }

    /// Two tight clusters far apart
    ///
    /// Returns 2000 samples: 1000 uniform on [0, 0.01]² and 1000 uniform on
    /// [100, 100.01]²
    pub fn point_masses_2d() -> DataMatrix {
        Self::point_mass_with_outliers(1000, 1000)
    }

    /// Nearly all mass at one spot with a small cluster far away
    ///
    /// Returns `main` samples uniform on [0, 0.01]² followed by `outliers`
    /// samples uniform on [100, 100.01]²
    pub fn point_mass_with_outliers(main: usize, outliers: usize) -> DataMatrix {
        let mut rng = StdRng::seed_from_u64(42);
        let jitter = Uniform::new(0.0, 0.01);
        let rows: Vec<Vec<f64>> = [(0.0, main), (100.0, outliers)]
            .iter()
            .flat_map(|&(center, size)| {
                (0..size)
                    .map(|_| vec![center + jitter.sample(&mut rng), center + jitter.sample(&mut rng)])
                    .collect::<Vec<_>>()
            })
            .collect();
        DataMatrix::from_rows(&rows).unwrap()
    }

    /// No structure at all
    ///
    /// Returns `n` samples uniform on the unit cube in `d` dimensions
    pub fn uniform_cube(n: usize, d: usize) -> DataMatrix {
        let mut rng = StdRng::seed_from_u64(42);
        let uniform = Uniform::new(0.0, 1.0);
        let values = (0..n * d).map(|_| uniform.sample(&mut rng)).collect();
        DataMatrix::from_row_major(values, d).unwrap()
    }
}

/// Creates a sample from a mixture of isotropic normals in the plane
///
/// Component `k` is centered at `centers[k]` with standard deviation
/// `stds[k]` in both coordinates and drawn with probability proportional to
/// `weights[k]`.
pub fn mixture_normal_2d(
    centers: &[(f64, f64)],
    stds: &[f64],
    weights: &[f64],
    n: usize,
    seed: u64,
) -> DataMatrix {
    assert_eq!(centers.len(), stds.len());
    assert_eq!(centers.len(), weights.len());
    assert!(!centers.is_empty());

    let total_weight: f64 = weights.iter().sum();
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut acc = 0.0;
    for &w in weights {
        acc += w / total_weight;
        cumulative.push(acc);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let uniform = Uniform::new(0.0, 1.0);
    let standard = Normal::new(0.0, 1.0).unwrap();

    let rows: Vec<Vec<f64>> = (0..n)
        .map(|_| {
            let u = uniform.sample(&mut rng);
            let k = cumulative.iter().position(|&c| u < c).unwrap_or(centers.len() - 1);
            let (cx, cy) = centers[k];
            vec![
                cx + stds[k] * standard.sample(&mut rng),
                cy + stds[k] * standard.sample(&mut rng),
            ]
        })
        .collect();
    DataMatrix::from_rows(&rows).unwrap()
}

/// Test parameters shared across the mode finding tests
pub struct TestParameters;

impl TestParameters {
    /// Simultaneous significance level of the fitted histograms
    pub const ALPHA: f64 = 0.1;

    /// Path cutoff for small hand-built region lists
    pub const SHORT_CUTOFF: usize = 4;
}
