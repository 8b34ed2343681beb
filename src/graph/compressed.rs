//! Memory-efficient weighted graph representation

use std::mem;

use petgraph::graph::IndexType;
use petgraph::visit::EdgeRef;
use petgraph::Directed;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::graph::builder::GraphBuilder;
use crate::graph::{Digraph, Vertex, Weight};

/// Compressed sparse representation of a directed, weighted graph.
///
/// Both directions are stored so that incoming adjacency is as cheap to
/// iterate as outgoing adjacency. Each adjacency list is sorted by neighbor and
/// holds at most one edge per ordered vertex pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// offsets[i] to offsets[i+1] defines the outgoing edge range for node i
    pub offsets: Vec<usize>,

    /// Concatenated outgoing lists of (target, weight)
    pub edges: Vec<(Vertex, Weight)>,

    /// Same layout as `offsets`, for incoming edges
    pub in_offsets: Vec<usize>,

    /// Concatenated incoming lists of (source, weight)
    pub in_edges: Vec<(Vertex, Weight)>,

    /// Optional mapping from internal node IDs to original string IDs
    pub node_ids: Option<Vec<String>>,
}

impl WeightedGraph {
    /// Build a graph over `node_count` vertices from `(source, target, weight)`
    /// triples.
    pub fn from_edges(node_count: usize, edges: &[(Vertex, Vertex, Weight)]) -> Result<Self> {
        let mut builder = GraphBuilder::with_vertices(node_count);
        for &(src, dst, weight) in edges {
            builder.add_indexed_edge(src, dst, i64::from(weight))?;
        }
        builder.build()
    }

    /// Number of stored edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get outgoing edges for a node
    pub fn outgoing_edges(&self, node: Vertex) -> &[(Vertex, Weight)] {
        &self.edges[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Get incoming edges for a node
    pub fn incoming_edges(&self, node: Vertex) -> &[(Vertex, Weight)] {
        &self.in_edges[self.in_offsets[node]..self.in_offsets[node + 1]]
    }

    /// Check if there's an edge from src to dst
    pub fn has_edge(&self, src: Vertex, dst: Vertex) -> bool {
        self.is_adjacent(src, dst)
    }

    pub fn out_degree(&self, node: Vertex) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    pub fn in_degree(&self, node: Vertex) -> usize {
        self.in_offsets[node + 1] - self.in_offsets[node]
    }

    /// Original string id of a node, falling back to its index
    pub fn label(&self, node: Vertex) -> String {
        self.node_ids
            .as_ref()
            .and_then(|ids| ids.get(node).cloned())
            .unwrap_or_else(|| node.to_string())
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = (self.offsets.capacity() + self.in_offsets.capacity()) * mem::size_of::<usize>();
        let edges = (self.edges.capacity() + self.in_edges.capacity())
            * mem::size_of::<(Vertex, Weight)>();

        let ids = self
            .node_ids
            .as_ref()
            .map(|ids| ids.iter().map(|s| s.capacity()).sum::<usize>())
            .unwrap_or(0);

        base + offsets + edges + ids
    }
}

impl Digraph for WeightedGraph {
    fn vertex_count(&self) -> usize {
        self.node_count
    }

    fn out_neighbors(&self, v: Vertex) -> &[(Vertex, Weight)] {
        self.outgoing_edges(v)
    }

    fn in_neighbors(&self, v: Vertex) -> &[(Vertex, Weight)] {
        self.incoming_edges(v)
    }
}

impl<N, Ix: IndexType> TryFrom<&petgraph::Graph<N, Weight, Directed, Ix>> for WeightedGraph {
    type Error = AnalysisError;

    fn try_from(graph: &petgraph::Graph<N, Weight, Directed, Ix>) -> Result<Self> {
        let mut builder = GraphBuilder::with_vertices(graph.node_count());
        for edge in graph.edge_references() {
            builder.add_indexed_edge(
                edge.source().index(),
                edge.target().index(),
                i64::from(*edge.weight()),
            )?;
        }
        builder.build()
    }
}
