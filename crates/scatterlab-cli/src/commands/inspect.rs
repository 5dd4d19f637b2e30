//! `inspect`: parse a file and print what was loaded (or why it wasn't).

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use scatterlab_core::error::CoreError;
use scatterlab_core::{tsd, DatasetSummary};
use tracing::info;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Path to the .tsd file
    pub file: PathBuf,

    /// Emit the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: InspectArgs) -> anyhow::Result<()> {
    match tsd::read_tsd_file(&args.file) {
        Ok(dataset) => {
            let summary = dataset.summary();
            info!(file = %args.file.display(), instances = summary.instances, "loaded");
            print_summary(&summary, args.json)?;
            Ok(())
        }
        Err(CoreError::Parse(report)) => {
            eprintln!("{} was rejected:", args.file.display());
            for line_error in &report.errors {
                eprintln!("  line {}: {}", line_error.line, line_error.error);
            }
            anyhow::bail!("{report}");
        }
        Err(err) => Err(err).with_context(|| format!("failed to read {}", args.file.display())),
    }
}

fn print_summary(summary: &DatasetSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("instances:       {}", summary.instances);
        println!("distinct labels: {}", summary.label_count);
        for label in &summary.distinct_labels {
            println!("  - {label}");
        }
    }
    Ok(())
}
