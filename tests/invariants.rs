//! Property tests over random weighted digraphs.

use proptest::prelude::*;

use graph_centrality_analyzer::{
    betweenness, betweenness_normalized, closeness, cluster, shortest_paths, Digraph, Distance,
    Linkage, WeightedGraph,
};

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (1usize..9).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n, 1u32..6), 0..(n * 3));
        (Just(n), edges)
    })
}

fn build(n: usize, edges: &[(usize, usize, u32)]) -> WeightedGraph {
    WeightedGraph::from_edges(n, edges).unwrap()
}

proptest! {
    #[test]
    fn dendrogram_partitions_vertices((n, edges) in graph_strategy(), complete in any::<bool>()) {
        let graph = build(n, &edges);
        let linkage = if complete { Linkage::Complete } else { Linkage::Single };
        let tree = cluster(&graph, linkage).unwrap();

        prop_assert_eq!(tree.leaf_count(), n);
        prop_assert_eq!(tree.internal_count(), n - 1);
        let mut leaves = tree.leaves();
        leaves.sort_unstable();
        prop_assert_eq!(leaves, (0..n).collect::<Vec<_>>());
        prop_assert_eq!(tree.merge_steps().len(), n - 1);
    }

    #[test]
    fn shortest_path_invariants((n, edges) in graph_strategy()) {
        let graph = build(n, &edges);
        for source in 0..n {
            let paths = shortest_paths(&graph, source).unwrap();
            prop_assert_eq!(paths.distance(source), Distance::Finite(0));
            prop_assert!(paths.predecessors(source).is_empty());

            for v in (0..n).filter(|&v| v != source) {
                prop_assert_eq!(paths.is_reachable(v), !paths.predecessors(v).is_empty());
                let Some(dv) = paths.distance(v).finite() else { continue };
                for &u in paths.predecessors(v) {
                    let du = paths.distance(u).finite().unwrap();
                    let w = graph.edge_weight(u, v).unwrap();
                    prop_assert_eq!(du + u64::from(w), dv);
                }
            }
        }
    }

    #[test]
    fn normalized_betweenness_is_scaled_raw((n, edges) in graph_strategy()) {
        let graph = build(n, &edges);
        let raw = betweenness(&graph).unwrap();
        let normalized = betweenness_normalized(&graph).unwrap();

        for v in 0..n {
            let expected = if n > 2 {
                raw[v] / ((n - 1) * (n - 2)) as f64
            } else {
                0.0
            };
            prop_assert!((normalized[v] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn isolated_vertex_is_inert((n, edges) in graph_strategy()) {
        let graph = build(n, &edges);
        let extended = build(n + 1, &edges);
        prop_assert!(extended.is_isolated(n));

        let before = betweenness(&graph).unwrap();
        let after = betweenness(&extended).unwrap();
        for v in 0..n {
            prop_assert!((before[v] - after[v]).abs() < 1e-9);
        }
        prop_assert_eq!(after[n], 0.0);
        prop_assert_eq!(closeness(&extended).unwrap()[n], 0.0);
    }

    #[test]
    fn centrality_is_non_negative((n, edges) in graph_strategy()) {
        let graph = build(n, &edges);
        let close = closeness(&graph).unwrap();
        let between = betweenness(&graph).unwrap();
        for v in 0..n {
            prop_assert!(close[v] >= 0.0);
            prop_assert!(between[v] >= 0.0);
        }
    }
}
