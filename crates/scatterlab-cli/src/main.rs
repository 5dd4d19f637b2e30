//! scatterlab CLI
//!
//! Non-graphical presentation layer for the scatterlab core: loads `.tsd`
//! files, reports dataset summaries, and drives algorithm runs printing
//! each update event as it arrives.
//!
//! # Commands
//!
//! - `inspect <file>`: parse and summarize a dataset (or report why it
//!   was rejected)
//! - `run <file> --algorithm <id> ...`: run an algorithm to completion

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// scatterlab - labeled 2-D point data analysis
#[derive(Parser)]
#[command(name = "scatterlab")]
#[command(version = "0.1.0")]
#[command(about = "Load tab-separated point data and run iterative analysis algorithms")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a .tsd file and print its summary
    Inspect(commands::inspect::InspectArgs),
    /// Run an algorithm against a .tsd file
    Run(commands::run::RunArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_target(true).init();

    match cli.command {
        Commands::Inspect(args) => commands::inspect::execute(args),
        Commands::Run(args) => commands::run::execute(args).await,
    }
}
