//! PAE - Main Entry Point
//!
//! Loads a graph file (or the built-in demo), links it and ticks it at a
//! fixed interval, printing node values after every tick.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pae::{config::GraphFile, graph::StatusTable, Runner};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Fixed-width status table
    Table,
    /// One JSON array of node snapshots per line
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "pae", version, about = "Per-tick automation engine")]
struct Args {
    /// Graph file (TOML). Runs the built-in demo when omitted.
    graph: Option<PathBuf>,

    /// Number of ticks to run (overrides the graph file)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Milliseconds between ticks (overrides the graph file)
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Seed for Random nodes (overrides the graph file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Link the graph and exit
    #[arg(long)]
    check: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for node output
    let (file_layer, _guard) = match &args.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "pae.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                ),
                Some(guard),
            )
        }
        None => (None, None),
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,pae=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    let mut file = match &args.graph {
        Some(path) => GraphFile::load(path)
            .with_context(|| format!("Failed to load graph {}", path.display()))?,
        None => {
            tracing::info!("No graph file given, running the demo graph");
            GraphFile::demo()
        }
    };

    if let Some(ticks) = args.ticks {
        file.run.ticks = Some(ticks);
    }
    if let Some(interval_ms) = args.interval_ms {
        file.run.interval_ms = interval_ms;
    }
    if let Some(seed) = args.seed {
        file.run.seed = Some(seed);
    }

    let mut motor = file.build_motor();
    let report = motor.initiate().context("Failed to link graph")?;

    if args.check {
        println!(
            "OK: {} nodes, {} sourced, {} parameter references",
            report.total_nodes, report.sourced_nodes, report.resolved_references
        );
        return Ok(());
    }

    let mut runner = Runner::new(motor, &file.run);
    let stdout = std::io::stdout();
    let format = args.format;

    runner.run(|motor| {
        let mut out = stdout.lock();
        match format {
            OutputFormat::Table => {
                writeln!(out, "tick {}", motor.tick_count())?;
                write!(out, "{}", StatusTable::new(motor).with_header(true))?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut out, &motor.snapshot())?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    })?;

    tracing::info!("Shutting down...");
    Ok(())
}
