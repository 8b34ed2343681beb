//! Shortest-path centrality and hierarchical clustering over weighted digraphs

pub mod analysis;
pub mod centrality;
pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod storage;

pub use centrality::{betweenness, betweenness_normalized, closeness, NodeValues};
pub use cluster::{cluster, Dendrogram, Linkage};
pub use error::{AnalysisError, Result};
pub use graph::{shortest_paths, Digraph, Distance, ShortestPaths, Vertex, Weight, WeightedGraph};
