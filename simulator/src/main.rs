use anyhow::Context;
use clap::Parser;
use generator::profile::{build_session_payload_from_config, GeneratorConfig};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline workflow driver for the gaze analytics core")]
struct Args {
    /// Load pipeline options from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 100)]
    min_fixation_ms: i64,
    #[arg(long, default_value_t = 30.0)]
    velocity_threshold: f32,
    /// Synthetic-session shape
    #[arg(long, default_value_t = 5)]
    fixation_points: usize,
    #[arg(long, default_value_t = 15)]
    samples_per_fixation: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Append the JSON run summary to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.min_fixation_ms, args.velocity_threshold)
    };

    let generator_config = GeneratorConfig {
        fixation_points: args.fixation_points,
        samples_per_fixation: args.samples_per_fixation,
        seed: args.seed,
        ..Default::default()
    };
    let payload = build_session_payload_from_config(&generator_config)?;

    let runner = Runner::new(workflow_config);
    let result = runner.execute(&payload)?;

    println!(
        "Offline run -> session {}, samples {}, fixations {}, saccades {}, blinks {}",
        result.session,
        result.sample_count,
        result.fixation_count,
        result.saccade_count,
        result.blink_count
    );

    if let Some(report_path) = args.report {
        let report = serde_json::to_string_pretty(&result).context("serializing run summary")?;
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening report {}", report_path.display()))?;
        file.write_all(report.as_bytes())?;
        file.write_all(b"\n")?;
    }

    Ok(())
}
