//! Closeness centrality

use crate::centrality::NodeValues;
use crate::error::Result;
use crate::graph::{shortest_paths, Digraph};

/// Closeness of every vertex using the Wasserman and Faust formula, which
/// stays meaningful on directed and disconnected graphs:
///
/// `((R - 1)^2 / (n - 1)) * (1 / D)`
///
/// where `R` counts the vertices reachable from `s` (itself included) and `D`
/// is the sum of their distances. Vertices without incident edges, or that
/// reach nothing, score 0.
pub fn closeness<G: Digraph + ?Sized>(graph: &G) -> Result<NodeValues> {
    let n = graph.vertex_count();
    log::info!("Computing closeness centrality for {} vertices", n);

    let mut values = NodeValues::zeros(n)?;

    for source in 0..n {
        if graph.is_isolated(source) {
            continue;
        }

        let paths = shortest_paths(graph, source)?;
        let distance_sum = paths.distance_sum();
        if distance_sum == 0 {
            continue;
        }

        values[source] = wasserman_faust(paths.reachable_count(), distance_sum, n);
    }

    Ok(values)
}

fn wasserman_faust(reachable: usize, distance_sum: u64, vertex_count: usize) -> f64 {
    let reached_others = (reachable - 1) as f64;
    let scale = reached_others * reached_others / (vertex_count - 1) as f64;
    scale / distance_sum as f64
}
