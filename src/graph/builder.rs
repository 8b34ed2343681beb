//! Graph construction module

use std::collections::HashMap;

use crate::error::{AnalysisError, Result};
use crate::graph::{Vertex, WeightedGraph, Weight};

/// Builder for incrementally constructing a WeightedGraph
pub struct GraphBuilder {
    /// Number of nodes
    node_count: usize,

    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, Vertex>,

    /// Node string IDs, only tracked when nodes are created by name
    node_ids: Vec<String>,

    /// Outgoing (target, weight) lists for each node
    adjacency_lists: Vec<Vec<(Vertex, Weight)>>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            node_count: 0,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
        }
    }

    /// Create a builder with `node_count` anonymous vertices `0..node_count`
    pub fn with_vertices(node_count: usize) -> Self {
        Self {
            node_count,
            id_to_index: HashMap::new(),
            node_ids: Vec::new(),
            adjacency_lists: vec![Vec::new(); node_count],
        }
    }

    /// Get or create a node ID for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> Vertex {
        // Anonymous vertices are named by their index
        while self.node_ids.len() < self.node_count {
            let idx = self.node_ids.len();
            self.id_to_index.insert(idx.to_string(), idx);
            self.node_ids.push(idx.to_string());
        }

        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_count;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency_lists.push(Vec::new());
        self.node_count += 1;

        idx
    }

    /// Add an edge between two named nodes, creating them as needed
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str, weight: i64) -> Result<()> {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);
        self.add_indexed_edge(src_idx, dst_idx, weight)
    }

    /// Add an edge between two existing vertex indices
    pub fn add_indexed_edge(&mut self, src: Vertex, dst: Vertex, weight: i64) -> Result<()> {
        for vertex in [src, dst] {
            if vertex >= self.node_count {
                return Err(AnalysisError::VertexOutOfRange {
                    vertex,
                    vertex_count: self.node_count,
                });
            }
        }

        let weight = Weight::try_from(weight)
            .ok()
            .filter(|&w| w > 0)
            .ok_or(AnalysisError::InvalidWeight { from: src, to: dst, weight })?;

        self.adjacency_lists[src].push((dst, weight));
        Ok(())
    }

    /// Build the compressed graph
    ///
    /// A repeated `(source, target)` pair keeps the weight added last.
    pub fn build(mut self) -> Result<WeightedGraph> {
        let mut incoming: Vec<Vec<(Vertex, Weight)>> = vec![Vec::new(); self.node_count];

        for (src, list) in self.adjacency_lists.iter_mut().enumerate() {
            // Stable sort keeps insertion order among duplicates
            list.sort_by_key(|&(target, _)| target);
            list.dedup_by(|later, earlier| {
                if later.0 == earlier.0 {
                    earlier.1 = later.1;
                    true
                } else {
                    false
                }
            });
            for &(dst, weight) in list.iter() {
                incoming[dst].push((src, weight));
            }
        }

        let (offsets, edges) = flatten(self.adjacency_lists)?;
        // Sources were visited in ascending order, so incoming lists are sorted
        let (in_offsets, in_edges) = flatten(incoming)?;

        let node_ids = if self.node_ids.is_empty() {
            None
        } else {
            Some(self.node_ids)
        };

        log::debug!(
            "Built weighted graph with {} nodes and {} edges",
            self.node_count,
            edges.len()
        );

        Ok(WeightedGraph {
            node_count: self.node_count,
            offsets,
            edges,
            in_offsets,
            in_edges,
            node_ids,
        })
    }
}

/// Concatenate adjacency lists into an offsets/edges pair
fn flatten(lists: Vec<Vec<(Vertex, Weight)>>) -> Result<(Vec<usize>, Vec<(Vertex, Weight)>)> {
    let edge_count: usize = lists.iter().map(|list| list.len()).sum();

    let mut offsets = Vec::new();
    offsets.try_reserve_exact(lists.len() + 1)?;
    let mut edges = Vec::new();
    edges.try_reserve_exact(edge_count)?;

    offsets.push(0);
    for list in lists {
        edges.extend(list);
        offsets.push(edges.len());
    }

    Ok((offsets, edges))
}
