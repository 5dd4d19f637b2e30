//! `run`: drive one algorithm run against a file, printing update events.
//!
//! The CLI is its own run controller: when a non-continuous run parks at a
//! reporting boundary, the command resumes it immediately after printing,
//! the same way an interactive user would press "run" again.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use scatterlab_core::runtime::{
    AlgorithmConfig, AlgorithmKind, AlgorithmRunner, RunContext, RunHandle, RunOutcome,
    RunState, RuntimeEvent, UpdateEvent, UpdatePayload,
};
use scatterlab_core::tsd;
use tracing::{debug, info};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to the .tsd file
    pub file: PathBuf,

    /// Algorithm identifier (random-classifier, random-clusterer, kmeans)
    #[arg(short, long)]
    pub algorithm: String,

    /// Number of clusters (clustering algorithms only)
    #[arg(short, long)]
    pub clusters: Option<u32>,

    /// Maximum number of iterations
    #[arg(long, default_value_t = 20)]
    pub max_iterations: u32,

    /// Iterations between printed updates
    #[arg(long, default_value_t = 1)]
    pub update_interval: u32,

    /// Keep running past reporting boundaries without pausing
    #[arg(long)]
    pub continuous: bool,

    /// Seed for the random source (omit for entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit update events as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: RunArgs) -> anyhow::Result<()> {
    let dataset = tsd::read_tsd_file(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let summary = dataset.summary();
    info!(
        file = %args.file.display(),
        instances = summary.instances,
        labels = summary.label_count,
        "dataset loaded"
    );

    let kind = AlgorithmKind::from_id(&args.algorithm)?;
    let config = AlgorithmConfig {
        max_iterations: args.max_iterations,
        update_interval: args.update_interval,
        continuous: args.continuous,
        cluster_count: args.clusters,
        ..AlgorithmConfig::default()
    };

    let runner = AlgorithmRunner::configure(kind, config, &summary, RunContext::new(), args.seed)
        .context("configuration rejected")?;
    let mut handle = runner.start(dataset).context("failed to start run")?;

    while let Some(event) = handle.next_event().await {
        match event {
            RuntimeEvent::Update(update) => {
                print_update(&update, args.json)?;
                if !args.continuous {
                    resume_when_parked(&handle).await?;
                }
            }
            RuntimeEvent::Finished(outcome) => {
                print_outcome(&outcome);
                if outcome.state == RunState::Failed {
                    let reason = outcome
                        .error
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "unknown".into());
                    anyhow::bail!("run failed: {reason}");
                }
            }
        }
    }
    Ok(())
}

/// Waits for the worker to reach its suspension point, then resumes it.
async fn resume_when_parked(handle: &RunHandle) -> anyhow::Result<()> {
    loop {
        match handle.state() {
            RunState::AwaitingResume => {
                debug!("resuming parked run");
                handle.resume()?;
                return Ok(());
            }
            state if state.is_terminal() => return Ok(()),
            _ => tokio::time::sleep(Duration::from_millis(5)).await,
        }
    }
}

fn print_update(update: &UpdateEvent, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(update)?);
        return Ok(());
    }
    match &update.payload {
        UpdatePayload::DecisionBoundary { start, end, .. } => {
            println!("iter {:>4}: boundary {start} -> {end}", update.iteration);
        }
        UpdatePayload::ClusterAssignment { clusters } => {
            let sizes: Vec<String> = clusters
                .iter()
                .map(|(label, members)| format!("{label}:{}", members.len()))
                .collect();
            println!(
                "iter {:>4}: {} clusters [{}]",
                update.iteration,
                clusters.len(),
                sizes.join(" ")
            );
        }
    }
    Ok(())
}

fn print_outcome(outcome: &RunOutcome) {
    println!(
        "run {} after {} iteration(s){}",
        outcome.state.name(),
        outcome.iterations,
        if outcome.cancelled { " (cancelled)" } else { "" }
    );
}
