//! Streamdump Command Line Interface
//!
//! Inspect a compression trace: apply view actions and print what a
//! renderer would draw, the codec DAG order, or the largest compression path.
//!
//! # Usage
//!
//! ```bash
//! # Visible graph after collapsing every standard graph
//! streamdump view --file trace.json --collapse-standard
//!
//! # Apply gestures in order, JSON output
//! cat trace.json | streamdump view -a toggle:C3 -a hide:G1 -o json
//!
//! # Producer-before-consumer codec order
//! streamdump order --file trace.json
//!
//! # Heaviest root-to-sink path
//! streamdump path --file trace.json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use streamdump_viz::streamdump_types::{NodeDescriptor, StreamdumpView};
use streamdump_viz::{StreamdumpGraph, ViewAction, ViewConfig};

#[derive(Parser)]
#[command(name = "streamdump")]
#[command(version = "0.1.0")]
#[command(about = "Inspect compression traces: visible graph, DAG order and largest path")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json, text, or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// YAML view configuration
    #[arg(long, short, global = true, env = "STREAMDUMP_CONFIG")]
    config: Option<PathBuf>,

    /// Trace file (reads stdin if not provided)
    #[arg(long, short, global = true)]
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the visible graph after applying actions
    View {
        /// Action to apply, in order: toggle:C3, expand:C1, hide:G2, standard:collapse
        #[arg(short, long = "action")]
        actions: Vec<ViewAction>,

        /// Collapse every standard graph at startup
        #[arg(long)]
        collapse_standard: bool,
    },

    /// Print codecs in DAG order
    Order,

    /// Print the largest compression path
    Path,
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if format == OutputFormat::Json {
                let output = serde_json::json!({ "error": format!("{e:#}") });
                println!("{output}");
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ViewConfig::from_path(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => ViewConfig::default(),
    };
    if let Commands::View {
        collapse_standard: true,
        ..
    } = cli.command
    {
        config = config.with_startup_collapse(true);
    }

    let json = read_input(cli.file)?;
    let mut graph = StreamdumpGraph::from_json_str(&json, config)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e))
        .context("building graph from trace")?;

    match cli.command {
        Commands::View { actions, .. } => cmd_view(&mut graph, &actions, cli.format),
        Commands::Order => cmd_order(&graph, cli.format),
        Commands::Path => cmd_path(&graph, cli.format),
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_view(graph: &mut StreamdumpGraph, actions: &[ViewAction], format: OutputFormat) -> Result<()> {
    for &action in actions {
        graph
            .apply(action)
            .with_context(|| format!("applying '{action}'"))?;
    }
    let view = graph.view().context("projecting visible graph")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Text => print_view_text(&view),
        OutputFormat::Pretty => print_view_pretty(&view),
    }
    Ok(())
}

fn cmd_order(graph: &StreamdumpGraph, format: OutputFormat) -> Result<()> {
    let order = graph.dag().dag_order();

    match format {
        OutputFormat::Json => {
            let ids: Vec<String> = order.iter().map(ToString::to_string).collect();
            println!("{}", serde_json::to_string_pretty(&ids)?);
        }
        OutputFormat::Text => {
            for codec in order {
                println!("{codec}");
            }
        }
        OutputFormat::Pretty => {
            println!("{} {} codec(s)", "DAG order".bold(), order.len());
            for (i, &id) in order.iter().enumerate() {
                let Some(codec) = graph.store().codec(id) else {
                    continue;
                };
                println!("  [{}] {}", i, codec.header().cyan());
            }
        }
    }
    Ok(())
}

fn cmd_path(graph: &StreamdumpGraph, format: OutputFormat) -> Result<()> {
    let path = graph.largest_compression_path();

    match format {
        OutputFormat::Json => {
            let steps: Vec<_> = path
                .iter()
                .map(|step| {
                    serde_json::json!({
                        "codec": step.codec.to_string(),
                        "via": step.via.map(|s| s.to_string()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&steps)?);
        }
        OutputFormat::Text => {
            let ids: Vec<String> = path.iter().map(|s| s.codec.to_string()).collect();
            println!("{}", ids.join(" -> "));
        }
        OutputFormat::Pretty => {
            println!("{} {} step(s)", "Largest path".bold(), path.len());
            for step in &path {
                let name = graph
                    .store()
                    .codec(step.codec)
                    .map(|c| c.header())
                    .unwrap_or_else(|| step.codec.to_string());
                match step.via.and_then(|s| graph.store().stream(s)) {
                    Some(stream) => println!(
                        "  {} {} {} bytes",
                        name.yellow(),
                        format!("--{}-->", stream.id).dimmed(),
                        stream.compressed_size
                    ),
                    None => println!("  {}", name.yellow()),
                }
            }
        }
    }
    Ok(())
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_view_text(view: &StreamdumpView) {
    for node in &view.nodes {
        println!("node {}", node.id());
    }
    for edge in &view.edges {
        println!("edge {} {} -> {}", edge.id, edge.source, edge.target);
    }
}

fn print_view_pretty(view: &StreamdumpView) {
    println!(
        "{} {} node(s), {} edge(s)",
        "Visible graph".bold(),
        view.nodes.len(),
        view.edges.len()
    );

    for node in &view.nodes {
        let (header, detail, failure) = match node {
            NodeDescriptor::Codec(c) => (&c.header, &c.detail, &c.failure_message),
            NodeDescriptor::Graph(g) => (&g.header, &g.detail, &g.failure_message),
        };
        let mut line = match node {
            NodeDescriptor::Codec(_) => header.cyan().to_string(),
            NodeDescriptor::Graph(_) => header.magenta().bold().to_string(),
        };
        if node.is_collapsed() {
            line.push_str(&format!(" {}", "[collapsed]".dimmed()));
        }
        if node.in_largest_path() {
            line.push_str(&format!(" {}", "*".yellow()));
        }
        println!("  {line}");
        println!("      {}", detail.dimmed());
        if let Some(message) = failure {
            println!("      {} {}", "failed:".red(), message);
        }
    }

    if !view.edges.is_empty() {
        println!();
    }
    for edge in &view.edges {
        let arrow = format!("{} -> {}", edge.source, edge.target);
        let arrow = if edge.in_largest_path {
            arrow.yellow().to_string()
        } else {
            arrow
        };
        let first_line = edge.label.lines().next().unwrap_or_default();
        println!("  {} {}", arrow, first_line.dimmed());
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            if io::stdin().is_terminal() {
                bail!("No input provided. Use --file or pipe a trace via stdin.");
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}
