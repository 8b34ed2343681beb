//! Input loading

pub mod edges;

pub use edges::{load_edge_list, parse_edge_list};
