//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, to_string_pretty, Value};

use crate::analysis::AnalysisReport;
use crate::centrality::NodeValues;
use crate::graph::WeightedGraph;

/// Save analysis results to the specified directory
pub fn save_results(
    report: &AnalysisReport,
    graph: &WeightedGraph,
    output_dir: &str,
    top_k: usize,
) -> Result<()> {
    log::info!("Saving analysis results to {}", output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(report, graph, output_dir, top_k)?;
    save_centrality(report, graph, output_dir)?;
    save_dendrogram(report, graph, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}

/// Highest-ranked vertices with their original ids
fn ranked(values: &NodeValues, graph: &WeightedGraph, top_k: usize) -> Vec<Value> {
    values
        .top_k(top_k)
        .into_iter()
        .map(|(v, score)| json!({ "id": graph.label(v), "score": score }))
        .collect()
}

/// Save summary information
fn save_summary(
    report: &AnalysisReport,
    graph: &WeightedGraph,
    output_dir: &str,
    top_k: usize,
) -> Result<()> {
    log::info!("Saving summary information");

    let isolated = (0..graph.node_count)
        .filter(|&v| graph.out_degree(v) == 0 && graph.in_degree(v) == 0)
        .count();

    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count,
            "edge_count": graph.edge_count(),
            "isolated_count": isolated,
            "avg_out_degree": graph.edge_count() as f64 / graph.node_count.max(1) as f64,
        },
        "top_closeness": ranked(&report.closeness, graph, top_k),
        "top_betweenness": ranked(&report.betweenness, graph, top_k),
        "betweenness_normalized": report.normalized,
        "dendrogram": {
            "leaf_count": report.dendrogram.leaf_count(),
            "merge_count": report.dendrogram.internal_count(),
            "depth": report.dendrogram.depth(),
        }
    });

    write_json(&Path::new(output_dir).join("summary.json"), &summary)
}

/// Save per-vertex centrality scores
fn save_centrality(report: &AnalysisReport, graph: &WeightedGraph, output_dir: &str) -> Result<()> {
    log::info!("Saving centrality scores");

    let nodes: Vec<Value> = (0..graph.node_count)
        .map(|v| {
            json!({
                "index": v,
                "id": graph.label(v),
                "closeness": report.closeness[v],
                "betweenness": report.betweenness[v],
            })
        })
        .collect();

    write_json(
        &Path::new(output_dir).join("centrality.json"),
        &json!({ "betweenness_normalized": report.normalized, "nodes": nodes }),
    )
}

/// Save the dendrogram as a flat list of merges
fn save_dendrogram(report: &AnalysisReport, graph: &WeightedGraph, output_dir: &str) -> Result<()> {
    log::info!("Saving dendrogram");

    let leaves: Vec<String> = report
        .dendrogram
        .leaves()
        .into_iter()
        .map(|v| graph.label(v))
        .collect();

    write_json(
        &Path::new(output_dir).join("dendrogram.json"),
        &json!({
            "leaf_order": leaves,
            "merges": report.dendrogram.merge_steps(),
        }),
    )
}
