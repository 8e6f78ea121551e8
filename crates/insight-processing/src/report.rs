//! Report assembly.
//!
//! Runs the four analyses over one table and merges their outputs into a
//! single serializable report, plus a Markdown rendering for human readers.
//! The components stay independent; this module is the host that hands the
//! same read-only table to each of them.

use crate::cluster::ClusterAnalyzer;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::outliers::OutlierDetector;
use crate::profiler::SchemaProfiler;
use crate::stats::StatisticalSummarizer;
use crate::types::{ClusterAssignment, OutlierReport, SchemaProfile, StatisticalSummary};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::{info, warn};

/// Missing-value count and share for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingValueEntry {
    pub column: String,
    pub count: usize,
    pub percentage: f64,
}

/// Merged output of all four analyses over one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub schema: SchemaProfile,
    pub summary: StatisticalSummary,
    pub outliers: OutlierReport,
    /// `None` when clustering was skipped for this dataset (fewer than 2
    /// numeric columns, or an entirely-null numeric column).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clusters: Option<ClusterAssignment>,
    /// Columns with at least one missing value, in descending count order.
    pub missing_values: Vec<MissingValueEntry>,
    pub warnings: Vec<String>,
}

/// Builds an [`AnalysisReport`] from a table.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Run profile, summary, outlier, and cluster analysis and merge the
    /// results.
    ///
    /// Cluster-skip conditions become a warning and an absent `clusters`
    /// section rather than a failed report; any other error propagates.
    pub fn generate(df: &DataFrame, config: &AnalysisConfig) -> Result<AnalysisReport> {
        info!("Profiling dataset structure");
        let schema = SchemaProfiler::profile(df)?;

        info!("Computing statistical summaries");
        let summary = StatisticalSummarizer::summarize(df)?;

        info!("Detecting outliers");
        let outliers = OutlierDetector::detect(df, config)?;

        info!("Running cluster analysis");
        let mut warnings = Vec::new();
        let clusters = match ClusterAnalyzer::analyze(df, config) {
            Ok(assignment) => Some(assignment),
            Err(e) if e.is_cluster_skip() => {
                warn!("Clustering skipped: {}", e);
                warnings.push(format!("Clustering skipped: {}", e));
                None
            }
            Err(e) => return Err(e),
        };

        let missing_values = missing_value_entries(&schema);

        Ok(AnalysisReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            schema,
            summary,
            outliers,
            clusters,
            missing_values,
            warnings,
        })
    }

    /// Render a report as Markdown.
    pub fn to_markdown(report: &AnalysisReport) -> String {
        let mut md = String::new();

        let _ = writeln!(md, "# Dataset Analysis Report\n");
        let _ = writeln!(md, "Generated: {}\n", report.generated_at);

        let _ = writeln!(md, "## Structure\n");
        let _ = writeln!(
            md,
            "- Rows: {}\n- Columns: {}\n",
            report.schema.row_count, report.schema.column_count
        );

        if !report.summary.is_empty() {
            let _ = writeln!(md, "## Summary Statistics\n");
            let _ = writeln!(md, "| Column | Count | Mean | Std | Min | Median | Max |");
            let _ = writeln!(md, "|---|---|---|---|---|---|---|");
            for name in &report.summary.columns {
                let stats = &report.summary.per_column_stats[name];
                let _ = writeln!(
                    md,
                    "| {} | {} | {} | {} | {} | {} | {} |",
                    name,
                    stats.count,
                    fmt_opt(stats.mean),
                    fmt_opt(stats.std),
                    fmt_opt(stats.min),
                    fmt_opt(stats.median),
                    fmt_opt(stats.max),
                );
            }
            let _ = writeln!(md);
        }

        if !report.outliers.is_empty() {
            let _ = writeln!(md, "## Outliers\n");
            let _ = writeln!(md, "| Column | Count | % of rows | Lower bound | Upper bound |");
            let _ = writeln!(md, "|---|---|---|---|---|");
            for (name, entry) in &report.outliers.columns {
                let _ = writeln!(
                    md,
                    "| {} | {} | {:.2} | {:.4} | {:.4} |",
                    name, entry.count, entry.percentage, entry.lower_bound, entry.upper_bound
                );
            }
            let _ = writeln!(md);
        }

        if !report.missing_values.is_empty() {
            let _ = writeln!(md, "## Missing Values\n");
            let _ = writeln!(md, "| Column | Missing | % |");
            let _ = writeln!(md, "|---|---|---|");
            for entry in &report.missing_values {
                let _ = writeln!(
                    md,
                    "| {} | {} | {:.2} |",
                    entry.column, entry.count, entry.percentage
                );
            }
            let _ = writeln!(md);
        }

        if let Some(clusters) = &report.clusters {
            let _ = writeln!(md, "## Clusters\n");
            let _ = writeln!(
                md,
                "- Distinct clusters: {}\n- Labeled rows: {}\n",
                clusters.distinct_clusters(),
                clusters.labels.len()
            );
        }

        for warning in &report.warnings {
            let _ = writeln!(md, "> Note: {}\n", warning);
        }

        md
    }
}

fn missing_value_entries(schema: &SchemaProfile) -> Vec<MissingValueEntry> {
    let mut entries: Vec<MissingValueEntry> = schema
        .missing_counts
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(column, &count)| MissingValueEntry {
            column: column.clone(),
            count,
            percentage: if schema.row_count > 0 {
                (count as f64 / schema.row_count as f64) * 100.0
            } else {
                0.0
            },
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.column.cmp(&b.column)));
    entries
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "-".to_string(),
    }
}
