//! Binary merge tree produced by agglomerative clustering

use std::mem;

use serde::{Deserialize, Serialize};

use crate::graph::Vertex;

/// Binary merge tree.
///
/// Children are exclusively owned by their parent. Every traversal here,
/// including drop, uses an explicit stack: a tree over `n` vertices can be
/// `n - 1` levels deep.
#[derive(Debug)]
pub enum Dendrogram {
    Leaf(Vertex),
    Merge {
        left: Box<Dendrogram>,
        right: Box<Dendrogram>,
        /// Linkage distance at which the two clusters joined; `None` when they
        /// were still infinitely far apart
        distance: Option<f64>,
    },
}

/// Reference to a cluster inside a flattened merge list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterRef {
    /// Singleton cluster of one vertex
    Leaf(Vertex),
    /// Cluster formed by the merge step at this index
    Merge(usize),
}

/// One merge in a flattened dendrogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeStep {
    pub left: ClusterRef,
    pub right: ClusterRef,
    pub distance: Option<f64>,
    /// Number of vertices in the merged cluster
    pub size: usize,
}

impl Dendrogram {
    pub fn leaf(vertex: Vertex) -> Self {
        Dendrogram::Leaf(vertex)
    }

    pub fn merge(left: Dendrogram, right: Dendrogram, distance: Option<f64>) -> Self {
        Dendrogram::Merge {
            left: Box::new(left),
            right: Box::new(right),
            distance,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Dendrogram::Leaf(_))
    }

    /// Vertex id of a leaf
    pub fn vertex(&self) -> Option<Vertex> {
        match self {
            Dendrogram::Leaf(v) => Some(*v),
            Dendrogram::Merge { .. } => None,
        }
    }

    /// The two merged subtrees of an internal node
    pub fn children(&self) -> Option<(&Dendrogram, &Dendrogram)> {
        match self {
            Dendrogram::Leaf(_) => None,
            Dendrogram::Merge { left, right, .. } => Some((&**left, &**right)),
        }
    }

    /// Merge distance of an internal node. `None` for leaves and for merges
    /// made at infinite distance.
    pub fn merge_distance(&self) -> Option<f64> {
        match self {
            Dendrogram::Leaf(_) => None,
            Dendrogram::Merge { distance, .. } => *distance,
        }
    }

    /// Leaf vertices from left to right
    pub fn leaves(&self) -> Vec<Vertex> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Dendrogram::Leaf(v) => leaves.push(*v),
                Dendrogram::Merge { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.count_nodes().0
    }

    pub fn internal_count(&self) -> usize {
        self.count_nodes().1
    }

    fn count_nodes(&self) -> (usize, usize) {
        let (mut leaves, mut internal) = (0, 0);
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Dendrogram::Leaf(_) => leaves += 1,
                Dendrogram::Merge { left, right, .. } => {
                    internal += 1;
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        (leaves, internal)
    }

    /// Number of edges on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Dendrogram::Merge { left, right, .. } = node {
                stack.push((&**left, depth + 1));
                stack.push((&**right, depth + 1));
            }
        }
        deepest
    }

    /// Flatten the tree into merges in post-order: both children of a step
    /// are leaves or earlier steps.
    pub fn merge_steps(&self) -> Vec<MergeStep> {
        let mut steps = Vec::new();
        // (cluster, size) of finished subtrees
        let mut finished: Vec<(ClusterRef, usize)> = Vec::new();
        let mut stack = vec![(self, false)];

        while let Some((node, expanded)) = stack.pop() {
            match node {
                Dendrogram::Leaf(v) => finished.push((ClusterRef::Leaf(*v), 1)),
                Dendrogram::Merge { left, right, .. } if !expanded => {
                    stack.push((node, true));
                    stack.push((&**right, false));
                    stack.push((&**left, false));
                }
                Dendrogram::Merge { distance, .. } => {
                    let (Some((right, right_size)), Some((left, left_size))) =
                        (finished.pop(), finished.pop())
                    else {
                        unreachable!("both children finish before their parent");
                    };
                    finished.push((ClusterRef::Merge(steps.len()), left_size + right_size));
                    steps.push(MergeStep {
                        left,
                        right,
                        distance: *distance,
                        size: left_size + right_size,
                    });
                }
            }
        }

        steps
    }
}

impl Drop for Dendrogram {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        detach_children(self, &mut stack);
        // Each popped node has had its children detached, so dropping it
        // never recurses more than one level
        while let Some(mut node) = stack.pop() {
            detach_children(&mut node, &mut stack);
        }
    }
}

fn detach_children(node: &mut Dendrogram, stack: &mut Vec<Dendrogram>) {
    if let Dendrogram::Merge { left, right, .. } = node {
        if !left.is_leaf() {
            stack.push(mem::replace(left.as_mut(), Dendrogram::Leaf(0)));
        }
        if !right.is_leaf() {
            stack.push(mem::replace(right.as_mut(), Dendrogram::Leaf(0)));
        }
    }
}
