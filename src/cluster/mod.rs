//! Hierarchical agglomerative clustering

pub mod dendrogram;
pub mod hac;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

pub use dendrogram::{ClusterRef, Dendrogram, MergeStep};
pub use hac::cluster;

/// Rule for the distance between a merged cluster and a third cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Distance of the closest pair of members
    Single,
    /// Distance of the farthest pair of members
    Complete,
}

impl Linkage {
    /// Lance-Williams update from the two pre-merge distances to a third
    /// cluster.
    ///
    /// `None` is an infinite distance. It carries no linkage evidence, so both
    /// rules keep the finite side when only one side is finite.
    pub fn combine(self, a: Option<f64>, b: Option<f64>) -> Option<f64> {
        match (a, b) {
            (Some(a), Some(b)) => Some(match self {
                Linkage::Single => a.min(b),
                Linkage::Complete => a.max(b),
            }),
            (Some(d), None) | (None, Some(d)) => Some(d),
            (None, None) => None,
        }
    }
}

impl FromStr for Linkage {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Linkage::Single),
            "complete" => Ok(Linkage::Complete),
            _ => Err(AnalysisError::UnsupportedLinkage(s.to_string())),
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
        })
    }
}
