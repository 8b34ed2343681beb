//! Min-priority queue over vertices with decrease-key

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{try_filled, Result};
use crate::graph::Vertex;

/// Min-priority queue keyed by vertex.
///
/// Decreasing a key pushes a fresh heap entry; stale entries are skipped on
/// extraction. A vertex is returned by `extract_min` at most once.
pub struct VertexQueue<P: Ord + Copy> {
    heap: BinaryHeap<Reverse<(P, Vertex)>>,
    /// Current priority of each queued vertex, `None` once extracted or never inserted
    current: Vec<Option<P>>,
    len: usize,
}

impl<P: Ord + Copy> VertexQueue<P> {
    /// Create a queue able to hold vertices `0..capacity`
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut heap = BinaryHeap::new();
        heap.try_reserve(capacity)?;
        Ok(Self {
            heap,
            current: try_filled(capacity, None)?,
            len: 0,
        })
    }

    pub fn insert(&mut self, vertex: Vertex, priority: P) {
        if self.current[vertex].is_none() {
            self.len += 1;
        }
        self.current[vertex] = Some(priority);
        self.heap.push(Reverse((priority, vertex)));
    }

    /// Lower the priority of a queued vertex. Equal or larger priorities and
    /// vertices no longer queued are ignored.
    pub fn decrease_priority(&mut self, vertex: Vertex, priority: P) {
        match self.current[vertex] {
            Some(old) if priority < old => {
                self.current[vertex] = Some(priority);
                self.heap.push(Reverse((priority, vertex)));
            }
            _ => {}
        }
    }

    /// Remove and return the vertex with the lowest priority. Among equal
    /// priorities the lower vertex id comes first.
    pub fn extract_min(&mut self) -> Option<(Vertex, P)> {
        while let Some(Reverse((priority, vertex))) = self.heap.pop() {
            if self.current[vertex] == Some(priority) {
                self.current[vertex] = None;
                self.len -= 1;
                return Some((vertex, priority));
            }
        }
        None
    }

    pub fn contains(&self, vertex: Vertex) -> bool {
        self.current[vertex].is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
