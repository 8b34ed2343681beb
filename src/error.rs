//! Error types for graph analysis

use std::collections::TryReserveError;

use thiserror::Error;

/// Failures reported by the analysis routines.
///
/// Every variant except `Allocation` describes invalid input and is raised
/// before any computation starts.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A vertex index outside `[0, vertex_count)`
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },

    /// Linkage name that is neither single nor complete
    #[error("unsupported linkage method {0:?}: expected \"single\" or \"complete\"")]
    UnsupportedLinkage(String),

    /// Edge weights must be strictly positive and fit in a `u32`
    #[error("edge {from} -> {to} has weight {weight}; weights must be positive 32-bit integers")]
    InvalidWeight { from: usize, to: usize, weight: i64 },

    /// Clustering needs at least one vertex
    #[error("cannot cluster a graph without vertices")]
    EmptyGraph,

    #[error("failed to allocate analysis working state: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Allocate a vector of `len` copies of `value`, reporting allocation failure
/// instead of aborting.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut values = Vec::new();
    values.try_reserve_exact(len)?;
    values.resize(len, value);
    Ok(values)
}
