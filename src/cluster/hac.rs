//! Lance-Williams agglomerative clustering

use std::mem;

use itertools::Itertools;

use crate::cluster::{Dendrogram, Linkage};
use crate::error::{try_filled, AnalysisError, Result};
use crate::graph::{Digraph, Vertex};

/// Symmetric distances between cluster slots, packed as the upper triangle.
///
/// `None` is an infinite distance: no edge joins the two clusters.
struct ClusterDistances {
    size: usize,
    cells: Vec<Option<f64>>,
}

impl ClusterDistances {
    fn new(size: usize) -> Result<Self> {
        let cells = try_filled(size * size.saturating_sub(1) / 2, None)?;
        Ok(Self { size, cells })
    }

    /// Initial distance between vertices `i` and `j` is the inverse of the
    /// heavier of the two directed edges between them.
    fn from_graph<G: Digraph + ?Sized>(graph: &G) -> Result<Self> {
        let mut distances = Self::new(graph.vertex_count())?;

        for i in 0..graph.vertex_count() {
            for &(j, weight) in graph.out_neighbors(i) {
                if i == j {
                    continue;
                }
                let candidate = 1.0 / f64::from(weight);
                let current = distances.get(i, j);
                if current.map_or(true, |d| candidate < d) {
                    distances.set(i, j, Some(candidate));
                }
            }
        }

        Ok(distances)
    }

    fn index(&self, i: usize, j: usize) -> usize {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        lo * (2 * self.size - lo - 1) / 2 + (hi - lo - 1)
    }

    fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.cells[self.index(i, j)]
    }

    fn set(&mut self, i: usize, j: usize, distance: Option<f64>) {
        let idx = self.index(i, j);
        self.cells[idx] = distance;
    }

    /// Closest pair among `active` (sorted ascending), scanning `(i, j)` in
    /// lexicographic order; the first pair wins ties. Falls back to the first
    /// pair when every distance is infinite.
    fn closest_pair(&self, active: &[usize]) -> Option<(usize, usize, Option<f64>)> {
        let mut best: Option<(usize, usize, Option<f64>)> = None;

        for (i, j) in active.iter().copied().tuple_combinations() {
            let distance = self.get(i, j);
            let closer = match best {
                None => true,
                Some((_, _, best_distance)) => is_closer(distance, best_distance),
            };
            if closer {
                best = Some((i, j, distance));
            }
        }

        best
    }

    /// Fold `absorbed` into `survivor`: the survivor's distance to every other
    /// active slot becomes the linkage of the two pre-merge distances.
    fn merge(&mut self, survivor: usize, absorbed: usize, active: &[usize], linkage: Linkage) {
        for &k in active {
            if k == survivor || k == absorbed {
                continue;
            }
            let combined = linkage.combine(self.get(survivor, k), self.get(absorbed, k));
            self.set(survivor, k, combined);
        }
    }
}

/// Strict comparison where `None` is infinitely far
fn is_closer(candidate: Option<f64>, best: Option<f64>) -> bool {
    match (candidate, best) {
        (Some(c), Some(b)) => c < b,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

enum Slot {
    Active(Dendrogram),
    Merged,
}

/// Working state of one clustering run
struct ClusterState {
    distances: ClusterDistances,
    slots: Vec<Slot>,
    /// Ids of active slots in ascending order
    active: Vec<usize>,
}

impl ClusterState {
    fn new<G: Digraph + ?Sized>(graph: &G) -> Result<Self> {
        let n = graph.vertex_count();

        let mut slots = Vec::new();
        slots.try_reserve_exact(n)?;
        slots.extend((0..n).map(|v: Vertex| Slot::Active(Dendrogram::leaf(v))));

        let mut active = Vec::new();
        active.try_reserve_exact(n)?;
        active.extend(0..n);

        Ok(Self {
            distances: ClusterDistances::from_graph(graph)?,
            slots,
            active,
        })
    }

    fn closest_pair(&self) -> Option<(usize, usize, Option<f64>)> {
        self.distances.closest_pair(&self.active)
    }

    /// Merge slot `j` into slot `i`; `i` keeps the combined cluster
    fn merge(&mut self, i: usize, j: usize, distance: Option<f64>, linkage: Linkage) {
        self.distances.merge(i, j, &self.active, linkage);

        let taken = (
            mem::replace(&mut self.slots[i], Slot::Merged),
            mem::replace(&mut self.slots[j], Slot::Merged),
        );
        let (Slot::Active(left), Slot::Active(right)) = taken else {
            unreachable!("only active slots are listed in the active set");
        };
        self.slots[i] = Slot::Active(Dendrogram::merge(left, right, distance));

        self.active.retain(|&slot| slot != j);
    }

    fn into_root(mut self) -> Option<Dendrogram> {
        match self.active.as_slice() {
            [root] => match mem::replace(&mut self.slots[*root], Slot::Merged) {
                Slot::Active(tree) => Some(tree),
                Slot::Merged => None,
            },
            _ => None,
        }
    }
}

/// Cluster the vertices of `graph` bottom-up until one cluster remains.
///
/// Each vertex starts as its own cluster. The closest pair of active clusters
/// is merged repeatedly; the merged cluster's distance to the rest follows
/// `linkage`.
pub fn cluster<G: Digraph + ?Sized>(graph: &G, linkage: Linkage) -> Result<Dendrogram> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(AnalysisError::EmptyGraph);
    }

    log::info!("Clustering {} vertices with {} linkage", n, linkage);

    let mut state = ClusterState::new(graph)?;

    while let Some((i, j, distance)) = state.closest_pair() {
        log::debug!("Merging clusters {} and {} at distance {:?}", i, j, distance);
        state.merge(i, j, distance, linkage);
    }

    state.into_root().ok_or(AnalysisError::EmptyGraph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{ClusterRef, MergeStep};
    use crate::graph::WeightedGraph;
    use proptest::prelude::*;

    fn merge_distances(tree: &Dendrogram) -> Vec<Option<f64>> {
        tree.merge_steps().iter().map(|step| step.distance).collect()
    }

    /// 0-1 (10), 1-2 (5), 2-3 (4), 0-2 (1), 1-3 (2), all in both directions
    fn ladder() -> WeightedGraph {
        let undirected = [(0, 1, 10), (1, 2, 5), (2, 3, 4), (0, 2, 1), (1, 3, 2)];
        let edges: Vec<(usize, usize, u32)> = undirected
            .iter()
            .flat_map(|&(a, b, w)| [(a, b, w), (b, a, w)])
            .collect();
        WeightedGraph::from_edges(4, &edges).unwrap()
    }

    #[test]
    fn initial_distance_uses_heavier_direction() {
        let graph = WeightedGraph::from_edges(3, &[(0, 1, 2), (1, 0, 8), (2, 1, 4)]).unwrap();
        let distances = ClusterDistances::from_graph(&graph).unwrap();

        assert_eq!(distances.get(0, 1), Some(0.125));
        assert_eq!(distances.get(1, 0), Some(0.125));
        assert_eq!(distances.get(1, 2), Some(0.25));
        assert_eq!(distances.get(0, 2), None);
    }

    #[test]
    fn packed_indices_cover_upper_triangle_once() {
        let distances = ClusterDistances::new(5).unwrap();
        let indices: Vec<_> = (0..5)
            .tuple_combinations()
            .map(|(i, j)| distances.index(i, j))
            .collect();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn triangle_merges_lowest_pair_first() {
        let edges: Vec<(usize, usize, u32)> = (0..3)
            .flat_map(|i| (0..3).filter(move |&j| j != i).map(move |j| (i, j, 1)))
            .collect();
        let graph = WeightedGraph::from_edges(3, &edges).unwrap();
        let tree = cluster(&graph, Linkage::Single).unwrap();

        let (left, right) = tree.children().unwrap();
        assert_eq!(left.leaves(), vec![0, 1]);
        assert_eq!(left.merge_distance(), Some(1.0));
        assert_eq!(right.vertex(), Some(2));
    }

    #[test]
    fn single_linkage_chains() {
        let tree = cluster(&ladder(), Linkage::Single).unwrap();

        assert_eq!(
            tree.merge_steps().iter().map(|s| (s.left, s.right)).collect::<Vec<_>>(),
            vec![
                (ClusterRef::Leaf(0), ClusterRef::Leaf(1)),
                (ClusterRef::Merge(0), ClusterRef::Leaf(2)),
                (ClusterRef::Merge(1), ClusterRef::Leaf(3)),
            ]
        );
        assert_eq!(merge_distances(&tree), vec![Some(0.1), Some(0.2), Some(0.25)]);
    }

    #[test]
    fn complete_linkage_builds_balanced_pairs() {
        let tree = cluster(&ladder(), Linkage::Complete).unwrap();

        assert_eq!(
            tree.merge_steps().last(),
            Some(&MergeStep {
                left: ClusterRef::Merge(0),
                right: ClusterRef::Merge(1),
                distance: Some(1.0),
                size: 4,
            })
        );
        assert_eq!(merge_distances(&tree), vec![Some(0.1), Some(0.25), Some(1.0)]);
    }

    #[test]
    fn single_linkage_never_exceeds_complete_for_the_same_merge() {
        let graph = ladder();
        let active: Vec<usize> = (0..4).collect();
        let mut single = ClusterDistances::from_graph(&graph).unwrap();
        let mut complete = ClusterDistances::from_graph(&graph).unwrap();

        single.merge(0, 1, &active, Linkage::Single);
        complete.merge(0, 1, &active, Linkage::Complete);

        for k in [2, 3] {
            let (s, c) = (single.get(0, k), complete.get(0, k));
            assert!(!is_closer(c, s), "slot {k}: single {s:?} vs complete {c:?}");
        }
    }

    proptest! {
        #[test]
        fn single_linkage_never_exceeds_complete_along_any_merge_sequence(
            (n, edges, picks) in (2usize..9).prop_flat_map(|n| (
                Just(n),
                prop::collection::vec((0..n, 0..n, 1u32..6), 0..(n * 3)),
                prop::collection::vec((any::<usize>(), any::<usize>()), n - 1),
            ))
        ) {
            let graph = WeightedGraph::from_edges(n, &edges).unwrap();
            let mut single = ClusterDistances::from_graph(&graph).unwrap();
            let mut complete = ClusterDistances::from_graph(&graph).unwrap();
            let mut active: Vec<usize> = (0..n).collect();

            for (a, b) in picks {
                let first = active[a % active.len()];
                let rest: Vec<usize> = active.iter().copied().filter(|&s| s != first).collect();
                let second = rest[b % rest.len()];
                let (i, j) = (first.min(second), first.max(second));

                single.merge(i, j, &active, Linkage::Single);
                complete.merge(i, j, &active, Linkage::Complete);
                active.retain(|&slot| slot != j);

                for (x, y) in active.iter().copied().tuple_combinations() {
                    let (s, c) = (single.get(x, y), complete.get(x, y));
                    prop_assert!(!is_closer(c, s), "({}, {}): single {:?} vs complete {:?}", x, y, s, c);
                }
            }
            prop_assert_eq!(active.len(), 1);
        }
    }

    #[test]
    fn disconnected_vertices_still_join_the_tree() {
        let graph = WeightedGraph::from_edges(4, &[(0, 1, 1)]).unwrap();
        let tree = cluster(&graph, Linkage::Complete).unwrap();

        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.internal_count(), 3);
        assert_eq!(merge_distances(&tree), vec![Some(1.0), None, None]);
    }

    #[test]
    fn single_vertex_is_a_leaf() {
        let graph = WeightedGraph::from_edges(1, &[]).unwrap();
        let tree = cluster(&graph, Linkage::Single).unwrap();
        assert_eq!(tree.vertex(), Some(0));
    }

    #[test]
    fn empty_graph_is_rejected() {
        let graph = WeightedGraph::from_edges(0, &[]).unwrap();
        assert!(matches!(
            cluster(&graph, Linkage::Single),
            Err(AnalysisError::EmptyGraph)
        ));
    }
}
