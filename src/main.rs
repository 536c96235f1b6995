//! # ImpactRisk CLI
//!
//! Reads impact requests as JSON and prints impact reports.
//!
//! ## Usage
//!
//! ```bash
//! # Single request (or an array of requests) from a file
//! impactrisk analyze --input chelyabinsk.json --pretty
//!
//! # From stdin
//! echo '{"asteroid": {"diameter_m": 20, "composition": "ROCKY"}}' | impactrisk analyze
//!
//! # Analyze a saved small-body catalog record
//! impactrisk catalog --record apophis.json --velocity 12600 --angle 40
//! ```
//!
//! `RUST_LOG` and `IMPACTRISK_POPULATION_DENSITY` may be set in a `.env` file.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use impactrisk::{analyze_batch, analyze_request, CatalogRecord, ImpactRequest, ScenarioInput};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "impactrisk")]
#[command(about = "Asteroid impact consequence and deflection assessment")]
#[command(version)]
struct Cli {
    /// Population density applied when a request omits it (people/km²)
    #[arg(long, global = true, env = "IMPACTRISK_POPULATION_DENSITY")]
    population_density: Option<f64>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one request or an array of requests
    Analyze {
        /// JSON file to read; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Analyze a small-body catalog lookup record
    Catalog {
        /// Saved catalog record (JSON)
        #[arg(short, long)]
        record: PathBuf,

        #[command(flatten)]
        scenario: ScenarioArgs,
    },
}

#[derive(Args, Debug, Default)]
struct ScenarioArgs {
    /// Entry velocity (m/s)
    #[arg(long)]
    velocity: Option<f64>,

    /// Entry angle above horizon (degrees)
    #[arg(long)]
    angle: Option<f64>,

    /// Impact latitude (degrees)
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Impact longitude (degrees)
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    longitude: Option<f64>,
}

impl ScenarioArgs {
    fn into_scenario(self) -> ScenarioInput {
        ScenarioInput {
            velocity_ms: self.velocity,
            angle_deg: self.angle,
            impact_latitude: self.latitude,
            impact_longitude: self.longitude,
            ..Default::default()
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("failed to read stdin")?;
            Ok(body)
        }
    }
}

fn apply_population_default(request: &mut ImpactRequest, default: Option<f64>) {
    if request.scenario.population_density_per_km2.is_none() {
        request.scenario.population_density_per_km2 = default;
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;
    println!("{}", out);
    Ok(())
}

fn run_analyze(input: Option<&Path>, population_density: Option<f64>, pretty: bool) -> Result<()> {
    let body = read_input(input)?;
    let value: Value = serde_json::from_str(&body).context("input is not valid JSON")?;

    if value.is_array() {
        let mut requests: Vec<ImpactRequest> =
            serde_json::from_value(value).context("invalid request array")?;
        for request in &mut requests {
            apply_population_default(request, population_density);
        }

        let results: Vec<Value> = analyze_batch(&requests)
            .into_iter()
            .enumerate()
            .map(|(index, result)| match result {
                Ok(report) => {
                    tracing::info!(index, tnt_mt = report.energy_analysis.tnt_equivalent_megatons, "analyzed");
                    serde_json::to_value(report).unwrap_or(Value::Null)
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "request rejected");
                    serde_json::json!({ "error": e.to_string() })
                }
            })
            .collect();
        return print_json(&results, pretty);
    }

    let mut request: ImpactRequest = serde_json::from_value(value).context("invalid request")?;
    apply_population_default(&mut request, population_density);
    let report = analyze_request(&request).context("impact analysis failed")?;
    tracing::info!(
        tnt_mt = report.energy_analysis.tnt_equivalent_megatons,
        impact_type = %report.energy_analysis.impact_type,
        "analyzed"
    );
    print_json(&report, pretty)
}

fn run_catalog(
    record_path: &Path,
    scenario: ScenarioArgs,
    population_density: Option<f64>,
    pretty: bool,
) -> Result<()> {
    let body = std::fs::read_to_string(record_path)
        .with_context(|| format!("failed to read {}", record_path.display()))?;
    let record = CatalogRecord::from_json(&body)?;
    let name = record.name().unwrap_or("unknown").to_string();

    let mut request = ImpactRequest::new(
        record
            .to_input()
            .with_context(|| format!("cannot map catalog record '{}'", name))?,
        scenario.into_scenario(),
    );
    apply_population_default(&mut request, population_density);

    let report = analyze_request(&request)
        .with_context(|| format!("impact analysis failed for '{}'", name))?;
    tracing::info!(
        object = %name,
        tnt_mt = report.energy_analysis.tnt_equivalent_megatons,
        "analyzed"
    );
    print_json(&report, pretty)
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("impactrisk=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { input } => {
            run_analyze(input.as_deref(), cli.population_density, cli.pretty)
        }
        Command::Catalog { record, scenario } => {
            run_catalog(&record, scenario, cli.population_density, cli.pretty)
        }
    }
}
