//! Configuration management for the graph analyzer

use crate::cluster::Linkage;

/// Settings for one analysis run
#[derive(Debug, Clone)]
pub struct Config {
    /// Linkage rule for hierarchical clustering
    pub linkage: Linkage,

    /// Scale betweenness by the number of vertex pairs
    pub normalize_betweenness: bool,

    /// Number of top-ranked vertices listed per measure in the summary
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            linkage: Linkage::Single,
            normalize_betweenness: true,
            top_k: 10,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(linkage: Linkage, normalize_betweenness: bool, top_k: usize) -> Self {
        Self {
            linkage,
            normalize_betweenness,
            top_k,
        }
    }
}
