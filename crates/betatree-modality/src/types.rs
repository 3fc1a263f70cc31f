//! Core types for mode finding

use crate::graph::RegionGraph;
use std::fmt;

/// Result of mode finding over a list of selected regions
#[derive(Debug, Clone, PartialEq)]
pub struct ModalityResult {
    /// Region indices of the modes, densest first
    modes: Vec<usize>,
    /// For every region, the mode it belongs to
    assignment: Vec<usize>,
    /// Adjacency graph the modes were found on
    graph: RegionGraph,
}

impl ModalityResult {
    /// Create a new modality result
    pub fn new(modes: Vec<usize>, assignment: Vec<usize>, graph: RegionGraph) -> Self {
        Self {
            modes,
            assignment,
            graph,
        }
    }

    /// Get the region indices of the modes, in order of discovery
    pub fn modes(&self) -> &[usize] {
        &self.modes
    }

    /// Get the number of detected modes
    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// Check if the regions have a single mode
    pub fn is_unimodal(&self) -> bool {
        self.modes.len() == 1
    }

    /// Check if the regions have several modes
    pub fn is_multimodal(&self) -> bool {
        self.modes.len() > 1
    }

    /// Check if a region is a mode
    pub fn is_mode(&self, region: usize) -> bool {
        self.modes.contains(&region)
    }

    /// Get the region adjacency graph
    pub fn graph(&self) -> &RegionGraph {
        &self.graph
    }

    /// Mode that region `i` was absorbed into; a mode maps to itself
    pub fn assignment(&self, i: usize) -> Option<usize> {
        self.assignment.get(i).copied()
    }
}

impl fmt::Display for ModalityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ModalityResult({} modes among {} regions)",
            self.mode_count(),
            self.graph.len()
        )
    }
}
