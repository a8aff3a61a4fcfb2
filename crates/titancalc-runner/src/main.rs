//! Command-line entry point for the blueprint economics calculator.
//!
//! Reads the player config and the spreadsheet export, evaluates every
//! blueprint, and writes the report to a file and to stdout.
//!
//! ```text
//! config.yaml ──> PlayerConfig ──┐
//!                                ├─> PlayerCoefficients ──> Calculator ──> report
//! spreadsheet_data/*.json ──> DataSet
//! ```
//!
//! Config and file-level import failures abort the run. Malformed blueprint
//! rows and upgrade texts are logged and skipped.

mod error;
mod report;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use titancalc_core::{Calculator, DataSet, PlayerConfig, resolve};
use titancalc_types::BlueprintMetrics;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::CalcError;

/// Blueprint economics calculator.
#[derive(Parser, Debug)]
#[command(name = "titancalc")]
#[command(about = "Compute per-minute, per-slot blueprint metrics for a player account")]
struct Args {
    /// Player configuration file (YAML or JSON)
    #[arg(long, short = 'c', default_value = "config.yaml")]
    config: PathBuf,

    /// Directory holding the JSON spreadsheet export
    #[arg(long, short = 'd', default_value = "spreadsheet_data")]
    data_dir: PathBuf,

    /// Report output file
    #[arg(long, short = 'o', default_value = "result.txt")]
    output: PathBuf,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the config or export cannot be loaded, a worker level
/// is unknown, or the report cannot be written.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    info!(
        config = %args.config.display(),
        data_dir = %args.data_dir.display(),
        output = %args.output.display(),
        "titancalc starting"
    );

    let text = run(&args)?;
    std::io::stdout().lock().write_all(text.as_bytes())?;
    Ok(())
}

/// Load inputs, evaluate every blueprint, and write the report file.
fn run(args: &Args) -> Result<String, CalcError> {
    // 1. Player config.
    let config = PlayerConfig::from_file(&args.config)?;
    info!(
        workers = config.workers.len(),
        buildings = config.buildings.len(),
        "player config loaded"
    );

    // 2. Spreadsheet export.
    let data = DataSet::load(&args.data_dir)?;

    // 3. Coefficients. Fatal errors stop here, before any blueprint.
    let coefficients = resolve(&config, &data.speed_bonuses)?;

    // 4. Blueprints.
    let calculator = Calculator::new(coefficients, data.translation);
    let metrics: Vec<BlueprintMetrics> = calculator
        .run(&data.blueprints)
        .into_iter()
        .map(|report| report.metrics)
        .collect();

    // 5. Report.
    let text = report::render_report(&config, calculator.coefficients(), &metrics);
    std::fs::write(&args.output, &text).map_err(|source| CalcError::Output {
        path: args.output.clone(),
        source,
    })?;
    info!(
        path = %args.output.display(),
        blueprints = metrics.len(),
        "report written"
    );

    Ok(text)
}
