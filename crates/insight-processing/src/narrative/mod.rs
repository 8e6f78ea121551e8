//! Narrative generation from analysis results.
//!
//! Renders the merged analysis report into a text prompt and hands it to a
//! [`NarrativeProvider`] for prose generation. The analysis core never
//! performs network access itself; providers are constructed by the host
//! with credentials the host obtained.

mod openai;
mod provider;

pub use openai::OpenAiProvider;
pub use provider::NarrativeProvider;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::report::AnalysisReport;
use polars::prelude::*;
use serde_json::{Value, json};
use tracing::info;

/// Correlation JSON beyond this length is cut; the narrative needs the
/// shape of the relationships, not every digit.
const CORRELATION_PROMPT_LIMIT: usize = 1000;

/// Generate a narrative for a report using the given provider.
pub fn generate_narrative(
    provider: &dyn NarrativeProvider,
    report: &AnalysisReport,
    df: &DataFrame,
    config: &AnalysisConfig,
) -> Result<String> {
    let prompt = build_prompt(report, df, config.narrative_sample_rows)?;
    info!(
        "Generating narrative via {} ({} char prompt)",
        provider.name(),
        prompt.len()
    );
    provider.generate_narrative(&prompt)
}

/// Render the analysis results into a prompt.
///
/// The prompt carries the dataset structure, outlier report, a truncated
/// correlation matrix, missing-value percentages, and a few sample rows
/// for context.
pub fn build_prompt(
    report: &AnalysisReport,
    df: &DataFrame,
    sample_rows: usize,
) -> Result<String> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let structure = serde_json::to_string_pretty(&report.schema)?;
    let outliers = serde_json::to_string_pretty(&report.outliers)?;

    let correlation: String = serde_json::to_string_pretty(&report.summary.correlation_matrix)?
        .chars()
        .take(CORRELATION_PROMPT_LIMIT)
        .collect();

    let missing: Value = report
        .missing_values
        .iter()
        .map(|e| (e.column.clone(), json!(format!("{:.2}%", e.percentage))))
        .collect::<serde_json::Map<String, Value>>()
        .into();

    let samples = serde_json::to_string_pretty(&head_records(df, sample_rows)?)?;

    let cluster_line = match &report.clusters {
        Some(assignment) => format!(
            "- Number of Clusters Identified: {}",
            assignment.distinct_clusters()
        ),
        None => "- Clustering was not applicable to this dataset".to_string(),
    };

    Ok(format!(
        "Analyze the following dataset summary:\n\
         Data Structure:\n\
         - Total Rows: {rows}\n\
         - Columns: {columns}\n\
         - Numeric Columns: {numeric}\n\
         {cluster_line}\n\
         {structure}\n\n\
         Outliers:\n{outliers}\n\n\
         Correlation Summary:\n{correlation}\n\n\
         Missing Data Columns:\n{missing}\n\n\
         Sample Data:\n{samples}\n\n\
         Please provide a brief, insightful narrative that:\n\
         1. Describes the data briefly and the analysis carried out\n\
         2. Highlights key insights from the analysis\n\
         3. Suggests potential implications or actions based on the findings\n\
         4. Uses a storytelling approach that makes the data come alive\n\
         5. Stays concise, under 500 words\n\
         6. Covers potential patterns or relationships in the data\n\
         7. Covers the significance of the identified clusters\n",
        rows = report.schema.row_count,
        columns = columns.join(", "),
        numeric = report.summary.columns.join(", "),
        cluster_line = cluster_line,
        structure = structure,
        outliers = outliers,
        correlation = correlation,
        missing = serde_json::to_string_pretty(&missing)?,
        samples = samples,
    ))
}

/// First `n` rows as JSON records.
fn head_records(df: &DataFrame, n: usize) -> Result<Vec<Value>> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut records = Vec::new();
    for row in 0..n.min(df.height()) {
        let mut record = serde_json::Map::new();
        for (column, name) in df.get_columns().iter().zip(&names) {
            let value = column.as_materialized_series().get(row)?;
            record.insert(name.clone(), any_value_to_json(&value));
        }
        records.push(Value::Object(record));
    }
    Ok(records)
}

/// Convert a polars value to JSON: numbers stay numbers, strings stay
/// strings, anything exotic falls back to its display form.
fn any_value_to_json(value: &AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => json!(b),
        AnyValue::String(s) => json!(s),
        AnyValue::StringOwned(s) => json!(s.as_str()),
        other => match other.try_extract::<f64>() {
            Ok(v) if v.is_finite() => json!(v),
            _ => json!(format!("{}", other)),
        },
    }
}
