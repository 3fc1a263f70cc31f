//! End-to-end properties of fitted Beta-tree histograms

use betatree_core::{DataMatrix, Error};
use betatree_histogram::{
    beta_tree_histogram, BetaHistogram, BetaTreeBuilder, BoundingOption, HistogramConfig,
    LevelMethod, SelectedRegion,
};
use betatree_partition::leaf_threshold;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tracing_subscriber::filter::LevelFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::DEBUG)
        .try_init();
}

/// Equal mixture of N((-2, -2), I) and N((2, 2), 0.5² I)
fn gaussian_mixture(n: usize, seed: u64) -> DataMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let wide = Normal::new(0.0, 1.0).unwrap();
    let narrow = Normal::new(0.0, 0.5).unwrap();
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            if i % 2 == 0 {
                vec![-2.0 + wide.sample(&mut rng), -2.0 + wide.sample(&mut rng)]
            } else {
                vec![2.0 + narrow.sample(&mut rng), 2.0 + narrow.sample(&mut rng)]
            }
        })
        .collect();
    DataMatrix::from_rows(&rows).unwrap()
}

/// Smallest count a node can hold: a split needs ⌈4 ln n⌉ observations and
/// hands each child at least half of the rest
fn smallest_leaf(n: usize) -> usize {
    (leaf_threshold(n).ceil() as usize - 1) / 2
}

fn interiors_overlap(a: &SelectedRegion, b: &SelectedRegion) -> bool {
    a.lower
        .iter()
        .zip(&a.upper)
        .zip(b.lower.iter().zip(&b.upper))
        .all(|((&lo_a, &hi_a), (&lo_b, &hi_b))| lo_a < hi_b && lo_b < hi_a)
}

fn check_sound(hist: &BetaHistogram) {
    let min_count = smallest_leaf(hist.total_count());
    for region in hist.regions() {
        assert!(region.ci_lower() <= region.density);
        assert!(region.density <= region.ci_upper());
        assert!(region.count >= min_count);
        assert!(region.volume() > 0.0);
        assert_eq!(region.interval.alpha, hist.schedule().unwrap().alpha_at(region.depth).unwrap());
    }
}

#[test]
fn test_gaussian_mixture_end_to_end() {
    init_tracing();
    let data = gaussian_mixture(2000, 42);
    let hist = BetaTreeBuilder::new()
        .alpha(0.1)
        .method(LevelMethod::Weighted)
        .build()
        .unwrap()
        .fit(&data)
        .unwrap();

    assert!(hist.len() > 1);
    check_sound(&hist);

    let (lo, hi) = data.bounding_box().unwrap();
    let average: f64 = 1.0 / lo.iter().zip(&hi).map(|(l, h)| h - l).product::<f64>();
    assert!(hist.max_density().unwrap() > average);
    let sparsest = hist.min_density().unwrap();
    assert!(sparsest > 0.0 && sparsest < hist.max_density().unwrap());
    assert!(hist.regions().iter().all(|r| r.density >= sparsest));

    // Selected regions form an antichain of the partition: no two overlap
    for (i, a) in hist.regions().iter().enumerate() {
        for b in &hist.regions()[i + 1..] {
            assert!(!interiors_overlap(a, b), "{a} overlaps {b}");
        }
    }

    // The densest region sits on the narrow component
    let densest = hist
        .regions()
        .iter()
        .max_by(|a, b| a.density.total_cmp(&b.density))
        .unwrap();
    for p in 0..2 {
        assert!(densest.lower[p] + densest.upper[p] > 0.0);
    }
}

#[test]
fn test_region_table_layout() {
    let data = gaussian_mixture(1000, 7);
    let hist = beta_tree_histogram(&data, &HistogramConfig::default()).unwrap();
    let rows = hist.rows();
    assert_eq!(rows.len(), hist.len());
    assert_eq!(hist.column_names()[4], "density");
    for (row, region) in rows.iter().zip(hist.regions()) {
        assert_eq!(row.len(), 2 * 2 + 5);
        assert_eq!(&row[..2], region.lower.as_slice());
        assert_eq!(&row[2..4], region.upper.as_slice());
        assert_eq!(row[4], region.density);
        assert_eq!(row[7], region.count as f64);
        assert_eq!(row[8], region.depth as f64);
    }
}

#[test]
fn test_bounded_initialization_stays_inside_the_trimmed_box() {
    let data = gaussian_mixture(2000, 11);
    let hist = BetaTreeBuilder::new()
        .method(LevelMethod::Plain)
        .bounded(BoundingOption::Quantile, vec![0.01, 0.01])
        .build()
        .unwrap()
        .fit(&data)
        .unwrap();

    assert!(!hist.is_empty());
    check_sound(&hist);
    // The trimmed root is itself a bounded region
    assert!(hist.schedule().unwrap().alpha_at(0).is_some());

    let (lo, hi) = data.bounding_box().unwrap();
    for region in hist.regions() {
        for p in 0..2 {
            assert!(region.lower[p] > lo[p] && region.upper[p] < hi[p]);
        }
    }
}

#[test]
fn test_plain_and_weighted_both_cover_the_data() {
    let data = gaussian_mixture(1500, 3);
    for method in [LevelMethod::Plain, LevelMethod::Weighted] {
        let hist = BetaTreeBuilder::new().method(method).build().unwrap().fit(&data).unwrap();
        check_sound(&hist);
        let covered: usize = hist.regions().iter().map(|r| r.count).sum();
        assert!(covered > 0 && covered < data.n_rows());
        assert!(hist.find_region(&hist.regions()[0].lower).is_some());
    }
}

#[test]
fn test_config_from_json() {
    let config: HistogramConfig = serde_json::from_str(
        r#"{ "alpha": 0.05, "bounded": true, "option": "order_statistics", "exclusion": [2, 2] }"#,
    )
    .unwrap();
    assert_eq!(config.method, LevelMethod::Weighted);
    assert_eq!(config.option, Some(BoundingOption::OrderStatistics));

    let hist = beta_tree_histogram(&gaussian_mixture(800, 5), &config).unwrap();
    assert_eq!(hist.alpha(), 0.05);
    check_sound(&hist);

    let round_trip: HistogramConfig =
        serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(round_trip, config);
}

#[test]
fn test_bounded_without_exclusion_fails_fast() {
    let config = HistogramConfig {
        bounded: true,
        option: Some(BoundingOption::Quantile),
        ..Default::default()
    };
    // Even a dataset too small to partition reports the configuration problem
    let data = DataMatrix::from_rows(&[vec![0.0]]).unwrap();
    assert!(matches!(beta_tree_histogram(&data, &config), Err(Error::InvalidParameter(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_selected_regions_are_sound(
        n in 30usize..400,
        d in 1usize..4,
        seed in any::<u64>(),
        weighted in any::<bool>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let values: Vec<f64> = (0..n * d).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let data = DataMatrix::from_row_major(values, d).unwrap();
        let method = if weighted { LevelMethod::Weighted } else { LevelMethod::Plain };

        let hist = BetaTreeBuilder::new().method(method).build().unwrap().fit(&data).unwrap();
        prop_assert_eq!(hist.dimension(), d);
        prop_assert!(hist.schedule().is_some() || hist.is_empty());
        for region in hist.regions() {
            prop_assert!(region.ci_lower() <= region.density && region.density <= region.ci_upper());
            prop_assert_eq!(region.to_row().len(), 2 * d + 5);
            prop_assert!(region.count >= smallest_leaf(n));
        }
    }
}
