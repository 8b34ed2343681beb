//! Plain-text edge list loading

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::graph::{GraphBuilder, WeightedGraph};

/// Load a weighted edge list from a text file.
///
/// One edge per line: `source target [weight]`, separated by whitespace or
/// commas. The weight defaults to 1. Blank lines and lines starting with `#`
/// are skipped. Node names are arbitrary strings; vertex indices follow the
/// order in which names first appear.
pub fn load_edge_list<P: AsRef<Path>>(path: P) -> Result<WeightedGraph> {
    let path = path.as_ref();
    log::info!("Reading edge list: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let graph = parse_edge_list(&text)
        .with_context(|| format!("invalid edge list in {}", path.display()))?;

    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count,
        graph.edge_count()
    );
    log::info!(
        "Graph memory usage: {:.2} MB",
        graph.memory_usage() as f64 / (1024.0 * 1024.0)
    );

    Ok(graph)
}

/// Parse edge list text; see [`load_edge_list`] for the format
pub fn parse_edge_list(text: &str) -> Result<WeightedGraph> {
    let mut builder = GraphBuilder::with_capacity(1024);

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .collect();

        let (src, dst, weight) = match fields.as_slice() {
            [src, dst] => (*src, *dst, 1),
            [src, dst, weight] => {
                let weight = weight.parse::<i64>().with_context(|| {
                    format!("line {}: weight {:?} is not an integer", line_no + 1, weight)
                })?;
                (*src, *dst, weight)
            }
            _ => {
                return Err(anyhow!(
                    "line {}: expected `source target [weight]`, got {:?}",
                    line_no + 1,
                    line
                ))
            }
        };

        builder
            .add_edge(src, dst, weight)
            .with_context(|| format!("line {}", line_no + 1))?;
    }

    Ok(builder.build()?)
}
