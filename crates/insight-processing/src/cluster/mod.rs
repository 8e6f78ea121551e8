//! Cluster analysis pipeline.
//!
//! Strictly ordered stages over a derived copy of the table's numeric
//! columns: select -> impute (median) -> standardize -> project (PCA, for
//! visualization) -> cluster (k-means on the standardized, unreduced
//! matrix). The input table is never mutated; every original row gets a
//! label regardless of missing values.

mod kmeans;
mod pca;

pub use kmeans::KMeans;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::types::ClusterAssignment;
use crate::utils::{is_numeric_dtype, numeric_values_with_nulls, quantile, sanitize_column_name, sorted_copy};
use polars::prelude::*;
use tracing::{debug, info};

/// Groups rows into clusters via impute -> scale -> reduce -> cluster.
pub struct ClusterAnalyzer;

impl ClusterAnalyzer {
    /// Run the full pipeline on a table.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InsufficientFeatures`] when fewer than 2 numeric
    ///   columns exist; two principal components need two dimensions.
    /// - [`AnalysisError::AllMissingColumn`] when a numeric column is
    ///   entirely null; its median is undefined and silently imputing zero
    ///   would corrupt standardization.
    pub fn analyze(df: &DataFrame, config: &AnalysisConfig) -> Result<ClusterAssignment> {
        // Stage 1: column selection, preserving order.
        let numeric: Vec<&Series> = df
            .get_columns()
            .iter()
            .map(|c| c.as_materialized_series())
            .filter(|s| is_numeric_dtype(s.dtype()))
            .collect();

        if numeric.len() < 2 {
            return Err(AnalysisError::InsufficientFeatures {
                found: numeric.len(),
            });
        }

        info!(
            "Clustering {} rows over {} numeric features",
            df.height(),
            numeric.len()
        );

        // Stage 2: median imputation per column.
        let mut feature_columns = Vec::with_capacity(numeric.len());
        for series in &numeric {
            feature_columns.push(impute_median(series)?);
        }

        // Stage 3: standardization on the imputed data.
        for column in &mut feature_columns {
            standardize(column);
        }

        // Columns to row-major matrix.
        let n_rows = df.height();
        let matrix: Vec<Vec<f64>> = (0..n_rows)
            .map(|row| feature_columns.iter().map(|col| col[row]).collect())
            .collect();

        // Stage 4: 2-D projection, for visualization only.
        let projection = pca::project_2d(&matrix);

        // Stage 5: k-means on the standardized, unreduced matrix.
        let labels = KMeans::new(config.cluster_count, config.seed, config.max_iterations)
            .fit(&matrix);
        debug!("Assigned {} labels across {} requested clusters", labels.len(), config.cluster_count);

        Ok(ClusterAssignment { labels, projection })
    }
}

/// Replace a column's missing values with its median over valid values.
fn impute_median(series: &Series) -> Result<Vec<f64>> {
    let values = numeric_values_with_nulls(series)?;
    let valid: Vec<f64> = values.iter().copied().flatten().collect();

    let sorted = sorted_copy(&valid);
    let median = quantile(&sorted, 0.5)
        .ok_or_else(|| AnalysisError::AllMissingColumn(sanitize_column_name(series.name())))?;

    Ok(values.into_iter().map(|v| v.unwrap_or(median)).collect())
}

/// Scale a column to zero mean and unit variance in place.
///
/// Uses population variance, computed on the imputed data. A zero-variance
/// column becomes a constant zero vector; no division by zero.
fn standardize(column: &mut [f64]) {
    let n = column.len();
    if n == 0 {
        return;
    }

    let mean = column.iter().sum::<f64>() / n as f64;
    let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    let std = variance.sqrt();

    if std == 0.0 {
        column.fill(0.0);
        return;
    }
    for value in column.iter_mut() {
        *value = (*value - mean) / std;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn analyze(df: &DataFrame) -> Result<ClusterAssignment> {
        ClusterAnalyzer::analyze(df, &AnalysisConfig::default())
    }

    #[test]
    fn test_every_row_gets_a_label() {
        let df = df![
            "x" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
            "y" => [10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0],
        ]
        .unwrap();

        let assignment = analyze(&df).unwrap();
        assert_eq!(assignment.labels.len(), 10);
        assert_eq!(assignment.projection.len(), 10);
        assert!(assignment.labels.iter().all(|&l| l < 3));
    }

    #[test]
    fn test_single_numeric_column_fails() {
        let df = df![
            "x" => [1.0, 2.0, 3.0],
            "label" => ["a", "b", "c"],
        ]
        .unwrap();

        let error = analyze(&df).unwrap_err();
        assert!(matches!(
            error,
            AnalysisError::InsufficientFeatures { found: 1 }
        ));
    }

    #[test]
    fn test_all_null_column_fails() {
        let df = df![
            "x" => [Some(1.0), Some(2.0), Some(3.0)],
            "y" => [Option::<f64>::None, None, None],
        ]
        .unwrap();

        let error = analyze(&df).unwrap_err();
        match error {
            AnalysisError::AllMissingColumn(name) => assert_eq!(name, "y"),
            other => panic!("Expected AllMissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_rows_with_nulls_still_labeled() {
        let df = df![
            "x" => [Some(1.0), None, Some(3.0), Some(4.0), None],
            "y" => [Some(2.0), Some(5.0), None, Some(8.0), Some(9.0)],
        ]
        .unwrap();

        let assignment = analyze(&df).unwrap();
        // Imputation fills, never drops: labels cover all original rows
        assert_eq!(assignment.labels.len(), 5);
    }

    #[test]
    fn test_deterministic_under_fixed_seed() {
        let df = df![
            "x" => [1.0, 8.0, 2.0, 9.0, 3.0, 7.0, 15.0, 16.0],
            "y" => [2.0, 1.0, 3.0, 2.0, 1.0, 3.0, 14.0, 15.0],
        ]
        .unwrap();

        let first = analyze(&df).unwrap();
        let second = analyze(&df).unwrap();
        assert_eq!(first.labels, second.labels);
        assert_eq!(first.projection, second.projection);
    }

    #[test]
    fn test_zero_variance_column_tolerated() {
        let df = df![
            "constant" => [4.0, 4.0, 4.0, 4.0],
            "varying" => [1.0, 2.0, 3.0, 4.0],
        ]
        .unwrap();

        let assignment = analyze(&df).unwrap();
        assert_eq!(assignment.labels.len(), 4);
        assert!(assignment
            .projection
            .iter()
            .all(|p| p[0].is_finite() && p[1].is_finite()));
    }

    #[test]
    fn test_input_table_not_mutated() {
        let df = df![
            "x" => [Some(1.0), None, Some(3.0)],
            "y" => [Some(4.0), Some(5.0), Some(6.0)],
        ]
        .unwrap();

        let before = df.clone();
        let _ = analyze(&df).unwrap();
        assert!(df.equals_missing(&before));
    }

    #[test]
    fn test_impute_median_fills_with_median() {
        let series = Series::new("x".into(), &[Some(1.0), None, Some(3.0), Some(5.0)]);
        let filled = impute_median(&series).unwrap();
        assert_eq!(filled, vec![1.0, 3.0, 3.0, 5.0]);
    }

    #[test]
    fn test_standardize_zero_mean_unit_variance() {
        let mut column = vec![2.0, 4.0, 6.0, 8.0];
        standardize(&mut column);

        let mean: f64 = column.iter().sum::<f64>() / column.len() as f64;
        let variance: f64 =
            column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / column.len() as f64;
        assert!(mean.abs() < 1e-12);
        assert!((variance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_standardize_constant_column_is_zeros() {
        let mut column = vec![7.0, 7.0, 7.0];
        standardize(&mut column);
        assert_eq!(column, vec![0.0, 0.0, 0.0]);
    }
}
