//! Region adjacency graph

use betatree_histogram::SelectedRegion;
use std::collections::VecDeque;

/// Undirected graph over selected regions; two regions are adjacent when
/// their closed boxes intersect (shared faces, edges and corners count).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionGraph {
    neighbors: Vec<Vec<usize>>,
}

impl RegionGraph {
    /// Build the graph with a pairwise box intersection test
    pub fn from_regions(regions: &[SelectedRegion]) -> Self {
        let mut neighbors = vec![Vec::new(); regions.len()];
        for i in 0..regions.len() {
            for j in i + 1..regions.len() {
                if regions[i].touches(&regions[j]) {
                    neighbors[i].push(j);
                    neighbors[j].push(i);
                }
            }
        }
        // Lists come out sorted, which `is_adjacent` relies on
        Self { neighbors }
    }

    /// Build a graph from an explicit edge list over `len` nodes.
    ///
    /// Self-loops and duplicate edges are ignored.
    pub fn from_edges(len: usize, edges: &[(usize, usize)]) -> Self {
        let mut neighbors = vec![Vec::new(); len];
        for &(a, b) in edges {
            if a != b && a < len && b < len {
                neighbors[a].push(b);
                neighbors[b].push(a);
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        Self { neighbors }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Neighbors of a node in increasing order
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.neighbors[i]
    }

    /// Check if two distinct nodes share an edge
    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.neighbors
            .get(i)
            .is_some_and(|list| list.binary_search(&j).is_ok())
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Symmetric 0/1 adjacency matrix with a zero diagonal
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        let n = self.len();
        self.neighbors
            .iter()
            .map(|list| {
                let mut row = vec![0u8; n];
                for &j in list {
                    row[j] = 1;
                }
                row
            })
            .collect()
    }

    /// Connected components, each sorted, ordered by smallest member
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.len()];
        let mut components = Vec::new();
        for start in 0..self.len() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut component = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(v) = queue.pop_front() {
                for &u in &self.neighbors[v] {
                    if !seen[u] {
                        seen[u] = true;
                        component.push(u);
                        queue.push_back(u);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }

    /// Edge distance from every node to `target`, moving only through
    /// nodes accepted by `pass`. The target and the first node of a route
    /// are never checked against `pass`.
    pub(crate) fn distances_to<F>(&self, target: usize, pass: F) -> Vec<Option<usize>>
    where
        F: Fn(usize) -> bool,
    {
        let mut distance = vec![None; self.len()];
        distance[target] = Some(0);
        let mut queue = VecDeque::from([target]);
        while let Some(v) = queue.pop_front() {
            if v != target && !pass(v) {
                continue;
            }
            let next = distance[v].map(|d| d + 1);
            for &u in &self.neighbors[v] {
                if distance[u].is_none() {
                    distance[u] = next;
                    queue.push_back(u);
                }
            }
        }
        distance
    }
}
