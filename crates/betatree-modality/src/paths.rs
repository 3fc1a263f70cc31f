//! Bounded simple-path enumeration

use crate::graph::RegionGraph;

/// Iterator over the simple paths between two nodes with at most `cutoff`
/// edges, each yielded as its node sequence (endpoints included).
///
/// The search runs on an explicit stack. Before descending into a node it
/// checks that the target is still reachable within the remaining edge
/// budget, and it tries nodes closer to the target first, so the first path
/// yielded is a shortest one.
pub struct SimplePaths<'a> {
    graph: &'a RegionGraph,
    target: usize,
    cutoff: usize,
    passes: Vec<bool>,
    distance: Vec<Option<usize>>,
    on_path: Vec<bool>,
    path: Vec<usize>,
    stack: Vec<std::vec::IntoIter<usize>>,
}

impl<'a> SimplePaths<'a> {
    /// Paths from `from` to `to` with at most `cutoff` edges.
    ///
    /// A path from a node to itself is not enumerated.
    pub fn new(graph: &'a RegionGraph, from: usize, to: usize, cutoff: usize) -> Self {
        Self::start(graph, from, to, cutoff, vec![true; graph.len()])
    }

    /// Keep only paths whose intermediate nodes all satisfy `predicate`
    pub fn through<F>(self, predicate: F) -> Self
    where
        F: Fn(usize) -> bool,
    {
        let passes = (0..self.graph.len()).map(predicate).collect();
        match self.path.first().copied() {
            Some(from) => Self::start(self.graph, from, self.target, self.cutoff, passes),
            None => self,
        }
    }

    fn start(
        graph: &'a RegionGraph,
        from: usize,
        to: usize,
        cutoff: usize,
        passes: Vec<bool>,
    ) -> Self {
        let distance = graph.distances_to(to, |v| passes[v]);
        let mut paths = Self {
            graph,
            target: to,
            cutoff,
            passes,
            distance,
            on_path: vec![false; graph.len()],
            path: Vec::new(),
            stack: Vec::new(),
        };
        let reachable = paths.distance[from].is_some_and(|d| d <= cutoff);
        if from != to && reachable {
            paths.push(from);
        }
        paths
    }

    /// Descend into `node`, queueing its usable neighbors nearest first
    fn push(&mut self, node: usize) {
        self.on_path[node] = true;
        self.path.push(node);
        let mut next: Vec<usize> = self
            .graph
            .neighbors(node)
            .iter()
            .copied()
            .filter(|&u| u == self.target || (self.passes[u] && !self.on_path[u]))
            .filter(|&u| self.distance[u].is_some())
            .collect();
        next.sort_by_key(|&u| self.distance[u]);
        self.stack.push(next.into_iter());
    }

    fn pop(&mut self) {
        self.stack.pop();
        if let Some(node) = self.path.pop() {
            self.on_path[node] = false;
        }
    }
}

impl Iterator for SimplePaths<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(candidates) = self.stack.last_mut() {
            let Some(child) = candidates.next() else {
                self.pop();
                continue;
            };
            if self.on_path[child] {
                continue;
            }
            // Edges used once `child` is appended
            let used = self.path.len();
            if child == self.target {
                if used <= self.cutoff {
                    let mut found = self.path.clone();
                    found.push(child);
                    return Some(found);
                }
                continue;
            }
            if self.distance[child].is_some_and(|d| used + d <= self.cutoff) {
                self.push(child);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut paths: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        paths.sort();
        paths
    }

    #[test]
    fn test_square_with_diagonal() {
        // 0 - 1 - 3, 0 - 2 - 3, 1 - 2
        let graph = RegionGraph::from_edges(4, &[(0, 1), (1, 3), (0, 2), (2, 3), (1, 2)]);
        let all = sorted(SimplePaths::new(&graph, 0, 3, 10).collect());
        assert_eq!(
            all,
            vec![vec![0, 1, 2, 3], vec![0, 1, 3], vec![0, 2, 1, 3], vec![0, 2, 3]]
        );

        let short = sorted(SimplePaths::new(&graph, 0, 3, 2).collect());
        assert_eq!(short, vec![vec![0, 1, 3], vec![0, 2, 3]]);

        assert_eq!(SimplePaths::new(&graph, 0, 3, 1).count(), 0);
    }

    #[test]
    fn test_first_path_is_shortest() {
        // Long detour 0 - 1 - 2 - 3 - 5 listed before the shortcut 0 - 4 - 5
        let graph = RegionGraph::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 5), (0, 4), (4, 5)]);
        let first = SimplePaths::new(&graph, 0, 5, 10).next().unwrap();
        assert_eq!(first, vec![0, 4, 5]);
    }

    #[test]
    fn test_through_filters_intermediates() {
        let graph = RegionGraph::from_edges(4, &[(0, 1), (1, 3), (0, 2), (2, 3), (1, 2)]);
        let paths: Vec<_> = SimplePaths::new(&graph, 0, 3, 10).through(|v| v != 1).collect();
        assert_eq!(paths, vec![vec![0, 2, 3]]);

        // Endpoints are never filtered
        let direct: Vec<_> = SimplePaths::new(&graph, 0, 1, 10).through(|_| false).collect();
        assert_eq!(direct, vec![vec![0, 1]]);
    }

    #[test]
    fn test_unreachable_and_trivial() {
        let graph = RegionGraph::from_edges(4, &[(0, 1), (2, 3)]);
        assert_eq!(SimplePaths::new(&graph, 0, 3, 10).next(), None);
        assert_eq!(SimplePaths::new(&graph, 2, 2, 10).next(), None);
    }
}
