use anyhow::Context;
use clap::Parser;
use generator::profile::build_survey;
use log::info;
use seismocore::interface::TraceRequest;
use std::fs;
use std::path::{Path, PathBuf};
use workflow::config::WorkflowConfig;
use workflow::report::append_report;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline microseismic filtration and fracture tracing driver")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Run a JSON trace request instead of the synthetic workflow
    #[arg(long)]
    trace_request: Option<PathBuf>,
    #[arg(long, default_value_t = 10.0)]
    band_min: f64,
    #[arg(long, default_value_t = 40.0)]
    band_max: f64,
    #[arg(long, default_value_t = 0.05)]
    short_window: f64,
    #[arg(long, default_value_t = 1.0)]
    long_window: f64,
    #[arg(long, default_value_t = 1.0)]
    rank: f64,
    #[arg(long, default_value_t = 20.0)]
    radius: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Append a JSON summary line to this file
    #[arg(long, default_value = "tools/data/offline_report.log")]
    report: PathBuf,
}

fn run_trace_request(path: &Path) -> anyhow::Result<String> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading trace request {}", path.display()))?;
    let request: TraceRequest = serde_json::from_str(&contents)
        .with_context(|| format!("parsing trace request {}", path.display()))?;
    let response = request.run().context("tracing fracture azimuth")?;
    response.to_json().context("serializing trace response")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = args.trace_request.as_deref() {
        println!("{}", run_trace_request(path)?);
        return Ok(());
    }

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(
            (args.band_min, args.band_max),
            (args.short_window, args.long_window, args.rank),
            args.radius,
            args.seed,
        )
    };

    let runner = Runner::new(workflow_config.clone());
    let survey = build_survey(&workflow_config.generator, &workflow_config.port_point)?;
    let result = runner.execute(&survey)?;

    let azimuth = result
        .azimuth
        .map(|value| format!("{:.2} deg", value.to_degrees()))
        .unwrap_or_else(|| "n/a".to_string());
    println!(
        "Offline run -> STA/LTA peak {:.2} at {:.3} s, admitted {}/{} events, azimuth {}",
        result.slta_peak,
        result.slta_peak_time,
        result.admitted.len(),
        result.event_count,
        azimuth
    );

    append_report(&args.report, &result)?;
    let (processed, errors) = runner.metrics().snapshot();
    info!("operations processed {processed}, failed {errors}");

    Ok(())
}
