//! Single-source shortest paths with full tie tracking

use std::fmt;

use serde::Serialize;

use crate::error::{try_filled, AnalysisError, Result};
use crate::graph::queue::VertexQueue;
use crate::graph::{Digraph, Vertex};

/// Shortest-path distance from the source.
///
/// Every finite distance orders before `Unreachable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Distance {
    Finite(u64),
    Unreachable,
}

impl Distance {
    pub fn finite(self) -> Option<u64> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Finite(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Unreachable => f.write_str("INF"),
        }
    }
}

/// Shortest-path tree from one source, keeping every tied predecessor.
///
/// `pred[v]` lists each `u` such that some shortest path to `v` ends with the
/// edge `u -> v`. The lists together form a DAG rooted at the source.
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPaths {
    source: Vertex,
    dist: Vec<Distance>,
    pred: Vec<Vec<Vertex>>,
    /// Reachable vertices in the order they were settled
    order: Vec<Vertex>,
}

impl ShortestPaths {
    pub fn source(&self) -> Vertex {
        self.source
    }

    pub fn vertex_count(&self) -> usize {
        self.dist.len()
    }

    pub fn distance(&self, v: Vertex) -> Distance {
        self.dist[v]
    }

    pub fn distances(&self) -> &[Distance] {
        &self.dist
    }

    /// Predecessors of `v` in the order they were discovered
    pub fn predecessors(&self, v: Vertex) -> &[Vertex] {
        &self.pred[v]
    }

    pub fn is_reachable(&self, v: Vertex) -> bool {
        self.dist[v].is_reachable()
    }

    /// Reachable vertices, source first, by non-decreasing distance.
    ///
    /// Every predecessor of a vertex appears before it.
    pub fn settle_order(&self) -> &[Vertex] {
        &self.order
    }

    /// Number of reachable vertices, including the source
    pub fn reachable_count(&self) -> usize {
        self.order.len()
    }

    /// Sum of all finite distances
    pub fn distance_sum(&self) -> u64 {
        self.dist.iter().filter_map(|d| d.finite()).sum()
    }
}

impl fmt::Display for ShortestPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of nodes: {}", self.dist.len())?;
        writeln!(f, "Source vertex: {}", self.source)?;
        writeln!(f, "Distances:")?;
        for (v, d) in self.dist.iter().enumerate() {
            writeln!(f, "  {} -> {}: {}", self.source, v, d)?;
        }
        writeln!(f, "Predecessors:")?;
        for (v, preds) in self.pred.iter().enumerate() {
            write!(f, "  {v}:")?;
            if preds.is_empty() {
                write!(f, " -")?;
            }
            for u in preds {
                write!(f, " {u}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Run Dijkstra from `source`, recording every predecessor that lies on a
/// shortest path.
pub fn shortest_paths<G: Digraph + ?Sized>(graph: &G, source: Vertex) -> Result<ShortestPaths> {
    let n = graph.vertex_count();
    if source >= n {
        return Err(AnalysisError::VertexOutOfRange {
            vertex: source,
            vertex_count: n,
        });
    }

    let mut dist = try_filled(n, Distance::Unreachable)?;
    let mut pred: Vec<Vec<Vertex>> = try_filled(n, Vec::new())?;
    let mut order = Vec::new();
    order.try_reserve(n)?;
    dist[source] = Distance::Finite(0);

    let mut queue = VertexQueue::with_capacity(n)?;
    for (v, &d) in dist.iter().enumerate() {
        queue.insert(v, d);
    }

    while let Some((u, priority)) = queue.extract_min() {
        // Everything left in the queue is unreachable too, so nothing more
        // can be relaxed
        let Distance::Finite(du) = priority else {
            break;
        };
        order.push(u);

        for &(v, weight) in graph.out_neighbors(u) {
            let alt = Distance::Finite(du + u64::from(weight));
            if alt < dist[v] {
                dist[v] = alt;
                pred[v].clear();
                pred[v].push(u);
                queue.decrease_priority(v, alt);
            } else if alt == dist[v] {
                // u is settled once and adjacency holds no duplicates, so
                // the predecessor list never repeats a vertex
                pred[v].push(u);
            }
        }
    }

    log::debug!(
        "Shortest paths from {}: {} of {} vertices reachable",
        source,
        order.len(),
        n
    );

    Ok(ShortestPaths {
        source,
        dist,
        pred,
        order,
    })
}
