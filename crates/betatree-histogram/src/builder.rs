use crate::config::{BoundingOption, HistogramConfig};
use crate::select::select;
use crate::types::BetaHistogram;
use betatree_confidence::{allocate, propagate, LevelMethod};
use betatree_core::{DataMatrix, Error, Result};
use betatree_partition::PartitionBuilder;
use tracing::{debug, instrument};

/// Builder for configuring and creating Beta-tree histogram estimators.
pub struct BetaTreeBuilder {
    config: HistogramConfig,
}

impl BetaTreeBuilder {
    /// Creates a builder with the default configuration
    /// (α = 0.1, weighted levels, unbounded root).
    pub fn new() -> Self {
        Self {
            config: HistogramConfig::default(),
        }
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: HistogramConfig) -> Self {
        Self { config }
    }

    /// Sets the simultaneous significance level, in (0, 1).
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    /// Sets how α is split across tree depths.
    pub fn method(mut self, method: LevelMethod) -> Self {
        self.config.method = method;
        self
    }

    /// Starts partitioning from a box trimmed out of the data.
    ///
    /// `exclusion` holds one entry per dimension, read according to `option`.
    pub fn bounded(mut self, option: BoundingOption, exclusion: Vec<f64>) -> Self {
        self.config.bounded = true;
        self.config.option = Some(option);
        self.config.exclusion = Some(exclusion);
        self
    }

    /// Validates the configuration and builds the estimator.
    pub fn build(self) -> Result<BetaTreeHistogram> {
        self.config.validate()?;
        let partition = match self.config.bounded_init()? {
            Some(init) => PartitionBuilder::new().with_bounded_init(init),
            None => PartitionBuilder::new(),
        };
        Ok(BetaTreeHistogram {
            config: self.config,
            partition,
        })
    }
}

impl Default for BetaTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated Beta-tree histogram estimator
#[derive(Debug, Clone)]
pub struct BetaTreeHistogram {
    config: HistogramConfig,
    partition: PartitionBuilder,
}

impl BetaTreeHistogram {
    /// The configuration the estimator was built from
    pub fn config(&self) -> &HistogramConfig {
        &self.config
    }

    /// Fit the histogram: partition the data, allocate levels, propagate
    /// bounds and select the maximal consistent regions.
    ///
    /// A partition without any bounded region yields an empty histogram.
    #[instrument(skip(self, data), fields(n = data.n_rows(), d = data.n_dims(), alpha = self.config.alpha))]
    pub fn fit(&self, data: &DataMatrix) -> Result<BetaHistogram> {
        let tree = self.partition.build(data)?;

        let schedule = match allocate(tree.census(), self.config.alpha, self.config.method) {
            Ok(schedule) => schedule,
            Err(Error::NoBoundedRegions) => {
                debug!(nodes = tree.len(), "no bounded region, returning empty histogram");
                return Ok(BetaHistogram::empty(
                    data.n_rows(),
                    data.n_dims(),
                    self.config.alpha,
                    self.config.method,
                ));
            }
            Err(e) => return Err(e),
        };

        let annotations = propagate(&tree, &schedule)?;
        let regions = select(&tree, &annotations);

        debug!(
            nodes = tree.len(),
            annotated = annotations.len(),
            regions = regions.len(),
            "histogram fitted"
        );
        Ok(BetaHistogram::new(regions, data.n_rows(), data.n_dims(), schedule))
    }
}

/// Convenience function fitting a histogram straight from a configuration.
pub fn beta_tree_histogram(data: &DataMatrix, config: &HistogramConfig) -> Result<BetaHistogram> {
    BetaTreeBuilder::from_config(config.clone()).build()?.fit(data)
}
