//! Centrality measures derived from shortest-path trees

pub mod betweenness;
pub mod closeness;

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{try_filled, Result};
use crate::graph::Vertex;

pub use betweenness::{betweenness, betweenness_normalized, PathCounts};
pub use closeness::closeness;

/// One score per vertex, indexed by vertex id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeValues {
    values: Vec<f64>,
}

impl NodeValues {
    /// All-zero scores for `len` vertices
    pub fn zeros(len: usize) -> Result<Self> {
        Ok(Self {
            values: try_filled(len, 0.0)?,
        })
    }

    pub fn get(&self, v: Vertex) -> Option<f64> {
        self.values.get(v).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// `(vertex, value)` pairs in vertex order
    pub fn iter(&self) -> impl Iterator<Item = (Vertex, f64)> + '_ {
        self.values.iter().copied().enumerate()
    }

    /// Multiply every value by `factor`
    pub fn scale(&mut self, factor: f64) {
        for value in &mut self.values {
            *value *= factor;
        }
    }

    /// The `k` highest-scoring vertices, best first. Equal scores are ordered
    /// by vertex id.
    pub fn top_k(&self, k: usize) -> Vec<(Vertex, f64)> {
        let mut ranked: Vec<(Vertex, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(k);
        ranked
    }
}

impl From<Vec<f64>> for NodeValues {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl Index<Vertex> for NodeValues {
    type Output = f64;

    fn index(&self, v: Vertex) -> &f64 {
        &self.values[v]
    }
}

impl IndexMut<Vertex> for NodeValues {
    fn index_mut(&mut self, v: Vertex) -> &mut f64 {
        &mut self.values[v]
    }
}

impl fmt::Display for NodeValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (v, value) in self.iter() {
            writeln!(f, "{v}: {value:.6}")?;
        }
        Ok(())
    }
}
