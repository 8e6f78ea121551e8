//! Integration tests for the exploratory analysis pipeline.
//!
//! These tests verify end-to-end behavior of the four analyses and the
//! merged report over realistic datasets.

use insight_processing::{
    AnalysisConfig, AnalysisError, ClusterAnalyzer, ColumnType, OutlierDetector, ReportGenerator,
    SchemaProfiler, StatisticalSummarizer,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_csv(filename: &str) -> DataFrame {
    let path = fixtures_path().join(filename);
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path))
        .expect("Failed to create CSV reader")
        .finish()
        .expect("Failed to read CSV file")
}

fn config() -> AnalysisConfig {
    AnalysisConfig::default()
}

// ============================================================================
// Full Report over a Mixed Dataset
// ============================================================================

#[test]
fn test_full_report_mixed_dataset() {
    let df = load_csv("mixed_dataset.csv");

    let report = ReportGenerator::generate(&df, &config()).expect("report should build");

    assert_eq!(report.schema.row_count, 10);
    assert_eq!(report.schema.column_count, 5);

    // age, income, score are numeric; city is textual; signup_date is temporal
    assert_eq!(report.schema.column_types["age"], ColumnType::Numeric);
    assert_eq!(report.schema.column_types["city"], ColumnType::Textual);
    assert_eq!(
        report.schema.column_types["signup_date"],
        ColumnType::Temporal
    );

    assert_eq!(
        report.summary.columns,
        vec!["age".to_string(), "income".to_string(), "score".to_string()]
    );

    // The 310000 income is a clear upper-bound outlier
    let income = report.outliers.get("income").expect("income flagged");
    assert_eq!(income.count, 1);
    assert_eq!(income.percentage, 10.0);

    // Clustering ran and labeled every row despite the missing values
    let clusters = report.clusters.as_ref().expect("clusters present");
    assert_eq!(clusters.labels.len(), 10);
    assert_eq!(clusters.projection.len(), 10);

    // Missing-value table covers income and score, one null each
    assert_eq!(report.missing_values.len(), 2);
    for entry in &report.missing_values {
        assert_eq!(entry.count, 1);
        assert_eq!(entry.percentage, 10.0);
    }
}

#[test]
fn test_report_json_round_trip() {
    let df = load_csv("mixed_dataset.csv");
    let report = ReportGenerator::generate(&df, &config()).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let parsed: insight_processing::AnalysisReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.schema.row_count, report.schema.row_count);
    assert_eq!(parsed.summary.columns, report.summary.columns);
    assert_eq!(
        parsed.clusters.as_ref().unwrap().labels,
        report.clusters.as_ref().unwrap().labels
    );
}

// ============================================================================
// Component Independence and Non-Mutation
// ============================================================================

#[test]
fn test_analyses_do_not_mutate_the_table() {
    let df = load_csv("mixed_dataset.csv");
    let snapshot = df.clone();

    let _ = SchemaProfiler::profile(&df).unwrap();
    let _ = StatisticalSummarizer::summarize(&df).unwrap();
    let _ = OutlierDetector::detect(&df, &config()).unwrap();
    let _ = ClusterAnalyzer::analyze(&df, &config()).unwrap();

    assert!(df.equals_missing(&snapshot));
}

#[test]
fn test_component_results_agree_on_numeric_columns() {
    let df = load_csv("mixed_dataset.csv");

    let schema = SchemaProfiler::profile(&df).unwrap();
    let summary = StatisticalSummarizer::summarize(&df).unwrap();

    for name in &summary.columns {
        assert_eq!(schema.column_types[name], ColumnType::Numeric);
    }
}

// ============================================================================
// Spec Scenarios
// ============================================================================

#[test]
fn test_scenario_iqr_bounds() {
    // x: Q1=2, Q3=4, IQR=2, upper bound 7 -> 100 flagged; y clean
    let df = df![
        "x" => [1.0, 2.0, 3.0, 4.0, 100.0],
        "y" => [2.0, 4.0, 6.0, 8.0, 10.0],
    ]
    .unwrap();

    let report = OutlierDetector::detect(&df, &config()).unwrap();
    let x = report.get("x").expect("x flagged");
    assert_eq!(x.count, 1);
    assert_eq!(x.upper_bound, 7.0);
    assert!(report.get("y").is_none());
}

#[test]
fn test_scenario_single_numeric_column_cannot_cluster() {
    let df = df![
        "only" => [1.0, 2.0, 3.0, 4.0],
        "text" => ["a", "b", "c", "d"],
    ]
    .unwrap();

    let error = ClusterAnalyzer::analyze(&df, &config()).unwrap_err();
    assert!(matches!(
        error,
        AnalysisError::InsufficientFeatures { found: 1 }
    ));
    assert_eq!(error.error_code(), "INSUFFICIENT_FEATURES");
}

#[test]
fn test_scenario_all_null_numeric_column_cannot_cluster() {
    let df = df![
        "a" => [Some(1.0), Some(2.0), Some(3.0)],
        "b" => [Option::<f64>::None, None, None],
    ]
    .unwrap();

    let error = ClusterAnalyzer::analyze(&df, &config()).unwrap_err();
    assert!(matches!(error, AnalysisError::AllMissingColumn(_)));
}

#[test]
fn test_scenario_ten_rows_three_clusters() {
    let df = df![
        "x" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        "y" => [5.0, 3.0, 8.0, 1.0, 9.0, 2.0, 7.0, 4.0, 6.0, 10.0],
    ]
    .unwrap();

    let assignment = ClusterAnalyzer::analyze(&df, &config()).unwrap();
    assert_eq!(assignment.labels.len(), 10);
    assert!(assignment.labels.iter().all(|&label| label < 3));
}

#[test]
fn test_cluster_determinism_across_runs() {
    let df = load_csv("mixed_dataset.csv");

    let first = ClusterAnalyzer::analyze(&df, &config()).unwrap();
    let second = ClusterAnalyzer::analyze(&df, &config()).unwrap();

    assert_eq!(first.labels, second.labels);
    assert_eq!(first.projection, second.projection);
}

#[test]
fn test_different_seed_is_still_valid() {
    let df = load_csv("mixed_dataset.csv");
    let seeded = AnalysisConfig::builder().seed(7).build().unwrap();

    let assignment = ClusterAnalyzer::analyze(&df, &seeded).unwrap();
    assert_eq!(assignment.labels.len(), 10);
    assert!(assignment.labels.iter().all(|&label| label < 3));
}

// ============================================================================
// Degenerate Inputs
// ============================================================================

#[test]
fn test_all_textual_table() {
    let df = df![
        "a" => ["x", "y", "z"],
        "b" => ["p", "q", "r"],
    ]
    .unwrap();

    let report = ReportGenerator::generate(&df, &config()).unwrap();
    assert!(report.summary.is_empty());
    assert!(report.outliers.is_empty());
    assert!(report.clusters.is_none());
    assert!(!report.warnings.is_empty());
}

#[test]
fn test_correlation_matrix_symmetry_on_fixture() {
    let df = load_csv("mixed_dataset.csv");
    let summary = StatisticalSummarizer::summarize(&df).unwrap();

    let n = summary.columns.len();
    for i in 0..n {
        for j in 0..n {
            match (
                summary.correlation_matrix[i][j],
                summary.correlation_matrix[j][i],
            ) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9),
                (None, None) => {}
                other => panic!("Asymmetric correlation entries: {:?}", other),
            }
        }
    }
}

#[test]
fn test_constant_column_has_null_correlations_in_json() {
    let df = df![
        "constant" => [1.0, 1.0, 1.0],
        "varying" => [1.0, 2.0, 3.0],
    ]
    .unwrap();

    let summary = StatisticalSummarizer::summarize(&df).unwrap();
    let json = serde_json::to_string(&summary.correlation_matrix).unwrap();
    assert!(json.contains("null"));
}
