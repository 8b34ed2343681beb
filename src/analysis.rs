//! End-to-end analysis of one graph

use std::time::Instant;

use crate::centrality::{betweenness, betweenness_normalized, closeness, NodeValues};
use crate::cluster::{cluster, Dendrogram};
use crate::config::Config;
use crate::error::Result;
use crate::graph::Digraph;

/// Everything computed for one graph
#[derive(Debug)]
pub struct AnalysisReport {
    pub closeness: NodeValues,
    pub betweenness: NodeValues,
    /// Whether `betweenness` holds normalized values
    pub normalized: bool,
    pub dendrogram: Dendrogram,
}

/// Run closeness, betweenness and clustering over `graph`
pub fn run<G: Digraph + ?Sized>(graph: &G, config: &Config) -> Result<AnalysisReport> {
    log::info!(
        "Analyzing graph with {} vertices ({} linkage)",
        graph.vertex_count(),
        config.linkage
    );

    let started = Instant::now();
    let closeness = closeness(graph)?;
    log::info!("Closeness done in {:.2?}", started.elapsed());

    let started = Instant::now();
    let betweenness = if config.normalize_betweenness {
        betweenness_normalized(graph)?
    } else {
        betweenness(graph)?
    };
    log::info!("Betweenness done in {:.2?}", started.elapsed());

    let started = Instant::now();
    let dendrogram = cluster(graph, config.linkage)?;
    log::info!(
        "Clustering done in {:.2?}: dendrogram depth {}",
        started.elapsed(),
        dendrogram.depth()
    );

    Ok(AnalysisReport {
        closeness,
        betweenness,
        normalized: config.normalize_betweenness,
        dendrogram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Linkage;
    use crate::graph::WeightedGraph;

    #[test]
    fn raw_and_normalized_runs_differ_only_in_scale() {
        let graph = WeightedGraph::from_edges(3, &[(0, 1, 1), (1, 2, 1)]).unwrap();

        let raw = run(&graph, &Config::new(Linkage::Single, false, 3)).unwrap();
        let normalized = run(&graph, &Config::default()).unwrap();

        assert!(!raw.normalized);
        assert!(normalized.normalized);
        assert_eq!(raw.betweenness.as_slice(), &[0.0, 1.0, 0.0]);
        assert_eq!(normalized.betweenness.as_slice(), &[0.0, 0.5, 0.0]);
        assert_eq!(raw.closeness, normalized.closeness);
        assert_eq!(raw.dendrogram.leaf_count(), 3);
    }

    #[test]
    fn empty_graph_fails_at_clustering() {
        let graph = WeightedGraph::from_edges(0, &[]).unwrap();
        assert!(run(&graph, &Config::default()).is_err());
    }
}
