//! Betweenness centrality over tied shortest paths

use crate::centrality::NodeValues;
use crate::error::{try_filled, Result};
use crate::graph::{shortest_paths, Digraph, ShortestPaths, Vertex};

/// Shortest-path multiplicities for one source.
///
/// Counts are filled in settle order, so each vertex is visited once and every
/// predecessor is final before its successors read it. Counts are kept as
/// `f64`: heavily tied graphs exceed any integer width, and only ratios of
/// counts are consumed.
pub struct PathCounts<'a> {
    paths: &'a ShortestPaths,
    total: Vec<f64>,
}

impl<'a> PathCounts<'a> {
    pub fn new(paths: &'a ShortestPaths) -> Result<Self> {
        let mut total = try_filled(paths.vertex_count(), 0.0)?;
        total[paths.source()] = 1.0;

        for &v in paths.settle_order().iter().skip(1) {
            total[v] = paths.predecessors(v).iter().map(|&u| total[u]).sum();
        }

        Ok(Self { paths, total })
    }

    /// Number of distinct shortest paths from the source to `dest`
    pub fn total(&self, dest: Vertex) -> f64 {
        self.total[dest]
    }

    /// Fill `through[dest]` with the number of shortest paths from the source
    /// to `dest` that visit `middle`.
    ///
    /// Such a path is a shortest path to `middle` followed by a path from
    /// `middle` to `dest` inside the predecessor DAG, so the count is
    /// propagated forward from `middle` starting at `total(middle)`.
    pub fn through_into(&self, middle: Vertex, through: &mut [f64]) {
        through.fill(0.0);
        if self.total[middle] == 0.0 {
            return;
        }

        through[middle] = self.total[middle];
        for &v in self.paths.settle_order() {
            if v == middle {
                continue;
            }
            through[v] = self
                .paths
                .predecessors(v)
                .iter()
                .map(|&u| through[u])
                .sum();
        }
    }

    /// Allocating form of [`PathCounts::through_into`]
    pub fn through(&self, middle: Vertex) -> Result<Vec<f64>> {
        let mut through = try_filled(self.total.len(), 0.0)?;
        self.through_into(middle, &mut through);
        Ok(through)
    }
}

/// Raw betweenness: for every ordered triple of distinct vertices
/// `(src, middle, dest)` with `dest` reachable from `src`, `middle` earns the
/// fraction of shortest `src -> dest` paths that pass through it.
pub fn betweenness<G: Digraph + ?Sized>(graph: &G) -> Result<NodeValues> {
    let n = graph.vertex_count();
    log::info!("Computing betweenness centrality for {} vertices", n);

    let mut values = NodeValues::zeros(n)?;
    let mut through = try_filled(n, 0.0)?;

    for src in 0..n {
        // Nothing besides the source itself is reachable
        if graph.out_neighbors(src).is_empty() {
            continue;
        }

        let paths = shortest_paths(graph, src)?;
        let counts = PathCounts::new(&paths)?;
        let reached = paths.settle_order();

        for &middle in reached.iter().filter(|&&v| v != src) {
            counts.through_into(middle, &mut through);

            let share: f64 = reached
                .iter()
                .filter(|&&dest| dest != src && dest != middle)
                .map(|&dest| through[dest] / counts.total(dest))
                .sum();
            values[middle] += share;
        }
    }

    Ok(values)
}

/// Betweenness scaled by `1 / ((n - 1)(n - 2))`, the number of ordered pairs
/// that exclude a given vertex. Undefined below three vertices, where every
/// value is 0.
pub fn betweenness_normalized<G: Digraph + ?Sized>(graph: &G) -> Result<NodeValues> {
    let n = graph.vertex_count();
    let mut values = betweenness(graph)?;

    if n > 2 {
        let pairs = ((n - 1) * (n - 2)) as f64;
        values.scale(1.0 / pairs);
    } else {
        values = NodeValues::zeros(n)?;
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightedGraph;

    fn assert_values(actual: &NodeValues, expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (v, (&a, &e)) in actual.as_slice().iter().zip(expected).enumerate() {
            assert!((a - e).abs() < 1e-9, "vertex {v}: expected {e}, got {a}");
        }
    }

    #[test]
    fn directed_path_middle_carries_everything() {
        let graph = WeightedGraph::from_edges(3, &[(0, 1, 1), (1, 2, 1)]).unwrap();

        assert_values(&betweenness(&graph).unwrap(), &[0.0, 1.0, 0.0]);
        assert_values(&betweenness_normalized(&graph).unwrap(), &[0.0, 0.5, 0.0]);
    }

    #[test]
    fn diamond_splits_credit_between_tied_routes() {
        let graph =
            WeightedGraph::from_edges(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)]).unwrap();

        assert_values(&betweenness(&graph).unwrap(), &[0.0, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn path_counts_on_diamond() {
        let graph =
            WeightedGraph::from_edges(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)]).unwrap();
        let paths = shortest_paths(&graph, 0).unwrap();
        let counts = PathCounts::new(&paths).unwrap();

        assert_eq!(counts.total(0), 1.0);
        assert_eq!(counts.total(3), 2.0);
        assert_eq!(counts.through(1).unwrap(), vec![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn unreachable_middle_has_no_through_paths() {
        let graph = WeightedGraph::from_edges(3, &[(0, 1, 1)]).unwrap();
        let paths = shortest_paths(&graph, 0).unwrap();
        let counts = PathCounts::new(&paths).unwrap();

        assert_eq!(counts.total(2), 0.0);
        assert_eq!(counts.through(2).unwrap(), vec![0.0; 3]);
    }

    #[test]
    fn heavier_route_earns_nothing() {
        // 0 -> 1 -> 3 costs 2, 0 -> 2 -> 3 costs 4
        let graph =
            WeightedGraph::from_edges(4, &[(0, 1, 1), (1, 3, 1), (0, 2, 2), (2, 3, 2)]).unwrap();

        assert_values(&betweenness(&graph).unwrap(), &[0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn normalized_is_zero_below_three_vertices() {
        let graph = WeightedGraph::from_edges(2, &[(0, 1, 1), (1, 0, 1)]).unwrap();
        assert_values(&betweenness_normalized(&graph).unwrap(), &[0.0, 0.0]);
    }
}
