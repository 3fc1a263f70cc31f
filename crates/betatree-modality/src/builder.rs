use crate::detector::ModeFinder;
use betatree_core::Result;

/// Builder for configuring and creating mode finders.
pub struct ModeFinderBuilder {
    cutoff: usize,
}

impl ModeFinderBuilder {
    /// Path cutoff used when none is set
    pub const DEFAULT_CUTOFF: usize = 10;

    /// Creates a new mode finder builder.
    pub fn new() -> Self {
        Self {
            cutoff: Self::DEFAULT_CUTOFF,
        }
    }

    /// Sets the maximum path length, in edges, of the separation test.
    ///
    /// Longer cutoffs look further for a connecting path and so merge more
    /// regions, at a cost exponential in the cutoff.
    pub fn cutoff(mut self, cutoff: usize) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Builds the configured mode finder; a zero cutoff is rejected.
    pub fn build(self) -> Result<ModeFinder> {
        ModeFinder::new(self.cutoff)
    }
}

impl Default for ModeFinderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
