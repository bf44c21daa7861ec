//! CLI for the parallel Luby MIS solver.
//!
//! Reads `N M u1 v1 ... uM vM` from `--input` or stdin. Empty input runs the
//! six-vertex demo graph instead.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use luby_mis::{Graph, LubySolver, MisResult, SolverConfig, StageRecord, DEFAULT_SEED};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "luby")]
#[command(about = "Parallel Luby maximal independent set", long_about = None)]
struct Cli {
    /// Worker threads (default: available cores, at least 2)
    #[arg(long)]
    threads: Option<usize>,

    /// Seed for the deterministic priorities
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Graph file; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print every stage and enable debug logs
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Print the result as JSON instead of the summary banner
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "luby_mis=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn load_graph(input: Option<&PathBuf>) -> Result<Graph> {
    let parsed = match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Graph::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to read graph from {}", path.display()))?
        }
        None => Graph::from_reader(io::stdin().lock()).context("failed to read graph from stdin")?,
    };

    Ok(parsed.unwrap_or_else(|| {
        tracing::info!("no input graph, using the demo graph");
        Graph::demo()
    }))
}

fn print_stage(record: &StageRecord) {
    println!("[Stage {}]", record.stage);
    println!("  winners={:?}", record.winners);
    println!("  removed={:?}", record.removed);
    println!(
        "  active_left={} {:?}",
        record.active_remaining.len(),
        record.active_remaining
    );
    println!("  MIS_so_far={} {:?}", record.mis_so_far.len(), record.mis_so_far);
    println!();
}

fn print_summary(graph: &Graph, config: &SolverConfig, result: &MisResult) {
    let rule = "=".repeat(40);
    let thin = "-".repeat(40);
    println!("{rule}");
    println!("Luby MIS (Maximal Independent Set)");
    println!("Graph: N={}, M={}", graph.n(), graph.m());
    println!("Threads={}, Seed={}", config.threads(), config.seed());
    println!("{thin}");
    println!("MIS_size={}", result.mis.len());
    println!("MIS_nodes={:?}", result.mis);
    println!("{thin}");
    println!("stages={}", result.stages);
    println!("rounds={} (3 per stage)", result.rounds);
    println!(
        "messages={} (approx. neighbor inspections/notifications)",
        result.messages
    );
    println!("{rule}");
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = SolverConfig::default().with_seed(cli.seed);
    if let Some(threads) = cli.threads {
        config = config.with_threads(threads)?;
    }

    let graph = load_graph(cli.input.as_ref())?;
    let solver = LubySolver::new(&graph, config);
    let result = if cli.verbose && !cli.json {
        solver.solve_with(print_stage)?
    } else {
        solver.solve()?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&graph, &config, &result);
    }

    result
        .verify(&graph)
        .context("solver returned an invalid MIS")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
