//! CLI entry point for the exploratory analysis pipeline.

use anyhow::{Result, anyhow};
use clap::Parser;
use insight_processing::{AnalysisConfig, ReportGenerator, ingest};
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[cfg(feature = "ai")]
use insight_processing::narrative::{self, OpenAiProvider};
#[cfg(feature = "ai")]
use std::env;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory analysis for arbitrary tabular datasets",
    long_about = "Profiles schema, computes descriptive statistics and correlations,\n\
                  flags IQR outliers, and clusters rows of a CSV dataset.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  OPENAI_API_KEY    API key for narrative generation (optional)\n\n\
                  EXAMPLES:\n  \
                  # Analyze a dataset and write report files\n  \
                  insight-processing -i data.csv -o results/\n\n  \
                  # JSON to stdout for piping\n  \
                  insight-processing -i data.csv --json | jq .outliers\n\n  \
                  # Skip the LLM narrative\n  \
                  insight-processing -i data.csv --no-ai"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Output directory for report files
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Disable narrative generation (no network access)
    #[arg(long, default_value = "false")]
    no_ai: bool,

    /// Suppress progress output (only show errors)
    #[arg(short, long)]
    quiet: bool,

    /// IQR multiplier for outlier bounds
    #[arg(long, default_value = "1.5")]
    outlier_multiplier: f64,

    /// Number of k-means clusters
    #[arg(long, default_value = "3")]
    clusters: usize,

    /// RNG seed for cluster initialization
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Output JSON to stdout instead of writing report files
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file (API key for narrative)
    dotenv().ok();

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = AnalysisConfig::builder()
        .outlier_multiplier(args.outlier_multiplier)
        .cluster_count(args.clusters)
        .seed(args.seed)
        .build()
        .map_err(|e| anyhow!("{}", e))?;

    info!("Loading dataset from: {}", args.input);
    let df = ingest::load_csv(&args.input)?;

    let report = ReportGenerator::generate(&df, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let output_dir = PathBuf::from(&args.output);
    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir)?;
        info!("Created output directory: {}", args.output);
    }

    let json_path = output_dir.join("analysis_report.json");
    std::fs::write(&json_path, serde_json::to_string_pretty(&report)?)?;
    info!("Wrote {:?}", json_path);

    let mut markdown = ReportGenerator::to_markdown(&report);

    if !args.no_ai {
        match generate_narrative(&report, &df, &config) {
            Ok(Some(narrative)) => {
                markdown = format!("{}\n\n{}", narrative, markdown);
            }
            Ok(None) => {
                info!("No API key configured; skipping narrative");
            }
            Err(e) => {
                warn!("Narrative generation failed: {}", e);
            }
        }
    }

    let md_path = output_dir.join("README.md");
    std::fs::write(&md_path, markdown)?;
    info!("Wrote {:?}", md_path);

    if let Some(clusters) = &report.clusters {
        info!(
            "Analysis complete: {} rows, {} outlier columns, {} clusters",
            report.schema.row_count,
            report.outliers.columns.len(),
            clusters.distinct_clusters()
        );
    } else {
        info!(
            "Analysis complete: {} rows, {} outlier columns, clustering skipped",
            report.schema.row_count,
            report.outliers.columns.len()
        );
    }

    Ok(())
}

#[cfg(feature = "ai")]
fn generate_narrative(
    report: &insight_processing::AnalysisReport,
    df: &polars::prelude::DataFrame,
    config: &AnalysisConfig,
) -> Result<Option<String>> {
    let Ok(api_key) = env::var("OPENAI_API_KEY") else {
        return Ok(None);
    };

    let provider = OpenAiProvider::new(api_key)?;
    let narrative = narrative::generate_narrative(&provider, report, df, config)?;
    Ok(Some(narrative))
}

#[cfg(not(feature = "ai"))]
fn generate_narrative(
    _report: &insight_processing::AnalysisReport,
    _df: &polars::prelude::DataFrame,
    _config: &AnalysisConfig,
) -> Result<Option<String>> {
    Ok(None)
}
