use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use pagerank_rs::export::{self, DEFAULT_DOT_FILE};
use pagerank_rs::input;
use pagerank_rs::{
    format_ranking, validate, Graph, NodeName, PageRank, PageRankConfig, PageRankResult,
};

#[derive(Parser)]
#[command(name = "pagerank", version)]
#[command(about = "Rank the nodes of a directed graph by PageRank influence", long_about = None)]
struct Cli {
    /// Graph file, one `Node -> N1,N2,...` line per node. Omit for the interactive menu
    graph: Option<PathBuf>,
    /// Read GRAPH as JSON entries instead of the edge-list format
    #[arg(long)]
    json_graph: bool,
    /// Fail on the first malformed line instead of skipping it
    #[arg(long)]
    strict: bool,
    /// JSON file with `damping_factor`, `max_iterations`, `convergence_threshold`
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Damping factor in (0, 1)
    #[arg(short, long)]
    damping: Option<f64>,
    /// Iteration cap
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Convergence threshold (max per-node change)
    #[arg(long)]
    threshold: Option<f64>,
    /// Write a Graphviz DOT file (`--dot=PATH` to choose where)
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_DOT_FILE
    )]
    dot: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Only print the K highest-ranked nodes
    #[arg(short = 'n', long, value_name = "K")]
    top: Option<usize>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = build_config(cli)?;
    match &cli.graph {
        Some(path) => run_batch(cli, &config, path),
        None => run_interactive(cli, &config),
    }
}

fn build_config(cli: &Cli) -> Result<PageRankConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => PageRankConfig::default(),
    };
    if let Some(d) = cli.damping {
        config.damping_factor = d;
    }
    if let Some(max) = cli.max_iterations {
        config.max_iterations = max;
    }
    if let Some(t) = cli.threshold {
        config.convergence_threshold = t;
    }
    config.validate()?;
    Ok(config)
}

// ============================================================================
// Non-interactive: pagerank FILE [--dot]
// ============================================================================

fn run_batch(cli: &Cli, config: &PageRankConfig, path: &Path) -> Result<ExitCode> {
    let graph = if cli.strict && !cli.json_graph {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        input::parse_edge_list_strict(&text)?
    } else {
        load_or_empty(path, cli.json_graph)
    };

    let Some((result, elapsed)) = rank(&graph, config) else {
        return Ok(ExitCode::FAILURE);
    };
    report(cli, &result, elapsed)?;

    if let Some(dot) = &cli.dot {
        write_visualization(dot, &graph, &result)?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Interactive menu
// ============================================================================

fn run_interactive(cli: &Cli, config: &PageRankConfig) -> Result<ExitCode> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut out = io::stdout();

    println!("{}", "Welcome to the PageRank Calculator!".green().bold());
    println!("Choose an option to input the graph:");
    println!("1. Manual Input\n2. Load from File");

    let graph = match read_answer(&mut reader)?.as_str() {
        "1" => input::read_interactive(&mut reader, &mut out)?,
        "2" => {
            println!("Enter the file path:");
            let path = PathBuf::from(read_answer(&mut reader)?);
            load_or_empty(&path, cli.json_graph)
        }
        _ => {
            println!("Invalid choice. Exiting.");
            return Ok(ExitCode::FAILURE);
        }
    };

    let Some((result, elapsed)) = rank(&graph, config) else {
        return Ok(ExitCode::FAILURE);
    };
    report(cli, &result, elapsed)?;

    println!("Would you like to generate a visualization file? (yes/no)");
    if read_answer(&mut reader)?.eq_ignore_ascii_case("yes") {
        let dot = cli.dot.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DOT_FILE));
        write_visualization(&dot, &graph, &result)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Next trimmed line of input; empty at end of input.
fn read_answer(input: &mut impl BufRead) -> Result<String> {
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}

// ============================================================================
// Shared steps
// ============================================================================

/// Unreadable sources are reported and yield an empty graph, which
/// validation then rejects.
fn load_or_empty(path: &Path, json: bool) -> Graph {
    let loaded = if json {
        input::load_graph_json(path)
    } else {
        input::load_graph_file(path)
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("{} could not load {}: {}", "Error:".red(), path.display(), e);
        Graph::new()
    })
}

fn rank(graph: &Graph, config: &PageRankConfig) -> Option<(PageRankResult, Duration)> {
    if !validate(graph) {
        println!("Invalid graph input. Please check for issues like self-loops or empty nodes.");
        return None;
    }
    let start = Instant::now();
    let result = PageRank::run(graph, config);
    Some((result, start.elapsed()))
}

/// The part of `result` selected by `--top`.
fn shown_scores<'a>(cli: &Cli, result: &'a PageRankResult) -> &'a [(NodeName, f64)] {
    match cli.top {
        Some(k) => result.top(k),
        None => result.scores.as_slice(),
    }
}

/// `result` with its scores cut down to what `--top` selects, for `--json`.
fn json_view(cli: &Cli, result: &PageRankResult) -> PageRankResult {
    PageRankResult {
        scores: shown_scores(cli, result).to_vec(),
        ..result.clone()
    }
}

fn report(cli: &Cli, result: &PageRankResult, elapsed: Duration) -> Result<()> {
    if cli.json {
        export::write_json_report(&json_view(cli, result), &mut io::stdout().lock())?;
        return Ok(());
    }

    let shown = shown_scores(cli, result);
    println!("\n{}", "Influence Scores (PageRank):".bold());
    print!("{}", format_ranking(shown));

    if result.converged {
        println!(
            "\nConvergence achieved in {:.3} seconds ({} iterations).",
            elapsed.as_secs_f64(),
            result.iterations
        );
    } else {
        println!(
            "\n{} iteration cap of {} reached after {:.3} seconds without convergence.",
            "Note:".yellow(),
            result.iterations,
            elapsed.as_secs_f64()
        );
    }
    Ok(())
}

fn write_visualization(path: &Path, graph: &Graph, result: &PageRankResult) -> Result<()> {
    export::export_dot_file(path, graph, &result.scores)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!(
        "Visualization file '{}' generated. Use Graphviz to visualize.",
        path.display()
    );
    Ok(())
}
