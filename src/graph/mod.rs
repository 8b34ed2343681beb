//! Graph representation and shortest-path search

pub mod builder;
pub mod compressed;
pub mod queue;
pub mod shortest_path;

pub use builder::GraphBuilder;
pub use compressed::WeightedGraph;
pub use shortest_path::{shortest_paths, Distance, ShortestPaths};

/// Vertex identifier in `[0, vertex_count)`
pub type Vertex = usize;

/// Edge weight; always strictly positive
pub type Weight = u32;

/// Read access to a directed, weighted graph.
///
/// Adjacency slices are sorted by neighbor and contain at most one entry per
/// neighbor.
pub trait Digraph {
    fn vertex_count(&self) -> usize;

    /// Outgoing `(target, weight)` pairs of `v`
    fn out_neighbors(&self, v: Vertex) -> &[(Vertex, Weight)];

    /// Incoming `(source, weight)` pairs of `v`
    fn in_neighbors(&self, v: Vertex) -> &[(Vertex, Weight)];

    /// Weight of the edge `i -> j`, if present
    fn edge_weight(&self, i: Vertex, j: Vertex) -> Option<Weight> {
        let edges = self.out_neighbors(i);
        edges
            .binary_search_by_key(&j, |&(target, _)| target)
            .ok()
            .map(|idx| edges[idx].1)
    }

    /// Whether there is an edge `i -> j`
    fn is_adjacent(&self, i: Vertex, j: Vertex) -> bool {
        self.edge_weight(i, j).is_some()
    }

    /// Whether `v` has no incoming and no outgoing edges
    fn is_isolated(&self, v: Vertex) -> bool {
        self.out_neighbors(v).is_empty() && self.in_neighbors(v).is_empty()
    }
}
