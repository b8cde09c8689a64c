use clap::{Parser, Subcommand, ValueEnum};
use nt_core::FacetLabel;
use nt_graph::detail::{flows, neighbors, relationship_matrix};
use nt_graph::summary::{rank_sources, GraphTotals};
use nt_graph::{build_graph, FlowGraph, Node, Row};
use nt_poll::{load_config, Accumulator, PollPhase, ReplayExecutor};
use nt_query::{build_query, decode_rows_str, params_fingerprint, Attribute, QueryParams};
use std::path::{Path, PathBuf};

mod error;

use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "nt-cli")]
#[command(about = "Network traffic flow graphs from grouped query results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the query a poll config would execute
    Query {
        /// Path to the poll config YAML file
        config_path: PathBuf,
    },
    /// Fold result files (one per poll) into a graph and summarize it
    Build {
        /// Result row JSON files, in poll order
        #[arg(required = true)]
        frames: Vec<PathBuf>,
        /// How values are formatted
        #[arg(long, value_enum, default_value_t = AttributeArg::Throughput)]
        attribute: AttributeArg,
        /// Write the graph as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List flows into and out of one node
    Neighbors {
        /// Result row JSON files, in poll order
        #[arg(required = true)]
        frames: Vec<PathBuf>,
        /// Node label to inspect
        #[arg(long)]
        node: String,
        #[arg(long, value_enum, default_value_t = AttributeArg::Throughput)]
        attribute: AttributeArg,
    },
    /// Print the source-by-target value matrix
    Matrix {
        /// Result row JSON files, in poll order
        #[arg(required = true)]
        frames: Vec<PathBuf>,
    },
    /// Run the polling accumulator against recorded frames
    Poll {
        /// Path to the poll config YAML file
        config_path: PathBuf,
        /// Extra result files to replay after the config's own frames
        #[arg(long = "frame")]
        frames: Vec<PathBuf>,
        /// Stop after this many executions
        #[arg(long, default_value_t = 3)]
        cycles: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AttributeArg {
    Throughput,
    Count,
}

impl From<AttributeArg> for Attribute {
    fn from(arg: AttributeArg) -> Self {
        match arg {
            AttributeArg::Throughput => Attribute::Throughput,
            AttributeArg::Count => Attribute::Count,
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query { config_path } => cmd_query(&config_path),
        Commands::Build {
            frames,
            attribute,
            output,
        } => cmd_build(&frames, attribute.into(), output.as_deref()),
        Commands::Neighbors {
            frames,
            node,
            attribute,
        } => cmd_neighbors(&frames, &node, attribute.into()),
        Commands::Matrix { frames } => cmd_matrix(&frames),
        Commands::Poll {
            config_path,
            frames,
            cycles,
        } => cmd_poll(&config_path, frames, cycles),
    }
}

fn cmd_query(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let params = &config.params;

    if let Some(name) = &config.name {
        println!("Config: {}", name);
    }
    println!("Account:     {}", params.validate()?);
    println!("Facets:      {}", params.facets().join(", "));
    if params.is_repeating() {
        println!("Interval:    {}s", params.interval_seconds);
    } else {
        println!("Interval:    single poll");
    }
    println!("Fingerprint: {}", params_fingerprint(params));
    println!("\n{}", build_query(params));
    Ok(())
}

fn cmd_build(frames: &[PathBuf], attribute: Attribute, output: Option<&Path>) -> CliResult<()> {
    let graph = accumulate(frames)?;
    print_summary(&graph, attribute);

    println!("\nFlows:");
    for flow in flows(&graph) {
        println!(
            "  {} -> {}  {}",
            flow.source,
            flow.target,
            attribute.format(flow.value)
        );
    }

    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&graph)?)?;
        println!("\n✓ Wrote graph to {}", path.display());
    }
    Ok(())
}

fn cmd_neighbors(frames: &[PathBuf], label: &str, attribute: Attribute) -> CliResult<()> {
    let graph = accumulate(frames)?;
    let node = find_node(&graph, label)?;

    println!("{} ({})", node.name, attribute.format(node.value));
    let rows = neighbors(&graph, node.id)?;
    if rows.is_empty() {
        println!("  No flows");
    }
    for flow in rows {
        println!(
            "  {:<24} {:<24} {:>12}",
            flow.source.to_string(),
            flow.target.to_string(),
            attribute.format(flow.value)
        );
    }
    Ok(())
}

fn cmd_matrix(frames: &[PathBuf]) -> CliResult<()> {
    let graph = accumulate(frames)?;
    let matrix = relationship_matrix(&graph);

    let names: Vec<String> = graph.nodes().iter().map(|n| n.name.to_string()).collect();
    println!("source,{}", names.join(","));
    for (name, row) in names.iter().zip(&matrix) {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("{},{}", name, cells.join(","));
    }
    Ok(())
}

fn cmd_poll(config_path: &Path, extra: Vec<PathBuf>, cycles: usize) -> CliResult<()> {
    let config = load_config(config_path)?;
    let base = config_path.parent().unwrap_or(Path::new("."));
    let mut frames = config.frame_paths(base);
    frames.extend(extra);
    if frames.is_empty() {
        return Err(CliError::NoFrames);
    }

    let executor = ReplayExecutor::from_files(&frames)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_poll(config.params, executor, cycles))
}

async fn run_poll(params: QueryParams, executor: ReplayExecutor, cycles: usize) -> CliResult<()> {
    let attribute = params.attribute;
    let target = if params.is_repeating() { cycles.max(1) } else { 1 };
    if params.is_repeating() {
        println!(
            "Polling every {}s for {} executions",
            params.interval_seconds, target
        );
    }

    let mut acc = Accumulator::new(executor);
    let mut updates = acc.subscribe();
    acc.start(params)?;

    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.phase == PollPhase::Fetching {
            continue;
        }
        let served = acc.executor().served();
        if served == 0 {
            continue;
        }
        println!(
            "[poll {}] nodes={} edges={} merged={}",
            served,
            snapshot.nodes.len(),
            snapshot.edges.len(),
            snapshot.polls_completed
        );
        if served >= target {
            break;
        }
    }

    acc.stop();
    let snapshot = acc.snapshot();
    let graph = FlowGraph::from_parts(snapshot.nodes, snapshot.edges)?;
    println!();
    print_summary(&graph, attribute);
    Ok(())
}

fn load_frames(paths: &[PathBuf]) -> CliResult<Vec<Vec<Row>>> {
    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(path)?;
        frames.push(decode_rows_str(&content)?);
    }
    Ok(frames)
}

/// Fold frames in order, exactly as successive polls would.
fn accumulate(paths: &[PathBuf]) -> CliResult<FlowGraph> {
    let frames = load_frames(paths)?;
    let graph = frames
        .iter()
        .filter(|rows| !rows.is_empty())
        .fold(FlowGraph::new(), |prior, rows| build_graph(rows, prior, false));
    tracing::debug!(frames = frames.len(), nodes = graph.nodes().len(), "frames folded");
    Ok(graph)
}

fn find_node<'a>(graph: &'a FlowGraph, label: &str) -> CliResult<&'a Node> {
    graph
        .node_by_label(&FacetLabel::text(label))
        .or_else(|| {
            let number = label.parse::<f64>().ok()?;
            graph.node_by_label(&FacetLabel::Number(number))
        })
        .ok_or_else(|| CliError::UnknownNode(label.to_string()))
}

fn print_summary(graph: &FlowGraph, attribute: Attribute) {
    let totals = GraphTotals::of(graph);
    println!("Graph summary:");
    println!("  Nodes: {}", totals.node_count);
    println!("  Edges: {}", totals.edge_count);
    println!("  Sourced: {}", attribute.format(totals.source_total));

    let ranked = rank_sources(graph);
    if ranked.is_empty() {
        println!("\nNo data found");
        return;
    }
    println!("\nTop sources:");
    for row in ranked {
        println!(
            "  {:<32} {:>12}  {}",
            row.name.to_string(),
            attribute.format(row.value),
            row.color
        );
    }
}
