use anyhow::Result;
use clap::Parser;

use graph_centrality_analyzer::cluster::Linkage;
use graph_centrality_analyzer::config::Config;
use graph_centrality_analyzer::{analysis, data, storage};

#[derive(Parser, Debug)]
#[clap(
    name = "graph-centrality-analyzer",
    about = "Closeness, betweenness and hierarchical clustering of a weighted digraph"
)]
struct Cli {
    /// Path to input edge list (`source target [weight]` per line)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "analysis_results")]
    output_dir: String,

    /// Linkage method for clustering: single or complete
    #[clap(long, default_value = "single")]
    linkage: Linkage,

    /// Report raw betweenness instead of normalized values
    #[clap(long)]
    raw_betweenness: bool,

    /// Number of top vertices listed per measure in the summary
    #[clap(long, default_value = "10")]
    top: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    log::info!("Starting graph analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    let config = Config::new(args.linkage, !args.raw_betweenness, args.top);

    let graph = data::load_edge_list(&args.input)?;
    let report = analysis::run(&graph, &config)?;
    storage::save_results(&report, &graph, &args.output_dir, config.top_k)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
