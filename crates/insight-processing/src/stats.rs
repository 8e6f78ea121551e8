//! Descriptive statistics and correlations over the numeric columns.
//!
//! Every statistic here is defined over non-null values; missing entries
//! are filtered explicitly rather than left to library NaN-skipping
//! defaults, so results are reproducible across implementations.

use crate::error::Result;
use crate::types::{ColumnStats, StatisticalSummary};
use crate::utils::{
    is_numeric_dtype, mean, numeric_values, numeric_values_with_nulls, quantile, sample_std,
    sanitize_column_name, sorted_copy,
};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Computes descriptive statistics and a pairwise correlation matrix
/// restricted to numeric columns.
pub struct StatisticalSummarizer;

impl StatisticalSummarizer {
    /// Summarize the numeric columns of a table.
    ///
    /// Returns [`StatisticalSummary::empty`] when the table has no numeric
    /// columns; that is a valid degenerate result, not an error.
    pub fn summarize(df: &DataFrame) -> Result<StatisticalSummary> {
        let numeric: Vec<&Series> = df
            .get_columns()
            .iter()
            .map(|c| c.as_materialized_series())
            .filter(|s| is_numeric_dtype(s.dtype()))
            .collect();

        if numeric.is_empty() {
            debug!("No numeric columns; returning empty summary");
            return Ok(StatisticalSummary::empty());
        }

        let columns: Vec<String> = numeric
            .iter()
            .map(|s| sanitize_column_name(s.name()))
            .collect();

        let mut per_column_stats = HashMap::with_capacity(numeric.len());
        for (series, name) in numeric.iter().zip(&columns) {
            let values = numeric_values(series)?;
            per_column_stats.insert(name.clone(), describe(&values));
        }

        // Per-row views for pairwise-complete correlation.
        let mut row_views = Vec::with_capacity(numeric.len());
        for series in &numeric {
            row_views.push(numeric_values_with_nulls(series)?);
        }

        let n = numeric.len();
        let mut correlation_matrix = vec![vec![None; n]; n];
        for i in 0..n {
            correlation_matrix[i][i] = self_correlation(&row_views[i]);
            for j in (i + 1)..n {
                let coefficient = pearson(&row_views[i], &row_views[j]);
                correlation_matrix[i][j] = coefficient;
                correlation_matrix[j][i] = coefficient;
            }
        }

        Ok(StatisticalSummary {
            columns,
            per_column_stats,
            correlation_matrix,
        })
    }
}

/// Descriptive statistics over already-filtered valid values.
fn describe(values: &[f64]) -> ColumnStats {
    let sorted = sorted_copy(values);
    ColumnStats {
        count: values.len(),
        mean: mean(values),
        std: sample_std(values),
        min: sorted.first().copied(),
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

/// Diagonal entry: 1.0, or undefined when the column has zero variance.
fn self_correlation(values: &[Option<f64>]) -> Option<f64> {
    let valid: Vec<f64> = values.iter().copied().flatten().collect();
    if valid.len() < 2 {
        return None;
    }
    let m = mean(&valid)?;
    let variance: f64 = valid.iter().map(|v| (v - m).powi(2)).sum();
    if variance == 0.0 { None } else { Some(1.0) }
}

/// Pearson coefficient over rows where both columns are non-null.
///
/// Returns `None` when either column has zero variance on the shared rows,
/// or when fewer than 2 shared rows exist. Never coerced to 0: an undefined
/// coefficient and "no linear relationship" are different statements.
fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }

    Some(covariance / (var_a.sqrt() * var_b.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_describe_matches_known_values() {
        let df = df![
            "x" => [1.0, 2.0, 3.0, 4.0, 100.0],
        ]
        .unwrap();

        let summary = StatisticalSummarizer::summarize(&df).unwrap();
        let stats = &summary.per_column_stats["x"];

        assert_eq!(stats.count, 5);
        assert_eq!(stats.mean, Some(22.0));
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.q1, Some(2.0));
        assert_eq!(stats.median, Some(3.0));
        assert_eq!(stats.q3, Some(4.0));
        assert_eq!(stats.max, Some(100.0));
    }

    #[test]
    fn test_std_uses_sample_denominator() {
        let df = df![
            "x" => [1.0, 2.0, 3.0, 4.0, 5.0],
        ]
        .unwrap();

        let summary = StatisticalSummarizer::summarize(&df).unwrap();
        let std = summary.per_column_stats["x"].std.unwrap();
        // Variance with N-1 = 10/4 = 2.5
        assert!((std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_std_undefined_for_single_value() {
        let df = df![
            "x" => [Some(7.0), None, None],
        ]
        .unwrap();

        let summary = StatisticalSummarizer::summarize(&df).unwrap();
        let stats = &summary.per_column_stats["x"];
        assert_eq!(stats.count, 1);
        assert_eq!(stats.std, None);
        assert_eq!(stats.mean, Some(7.0));
    }

    #[test]
    fn test_no_numeric_columns_is_empty_not_error() {
        let df = df![
            "label" => ["a", "b", "c"],
        ]
        .unwrap();

        let summary = StatisticalSummarizer::summarize(&df).unwrap();
        assert!(summary.is_empty());
        assert!(summary.per_column_stats.is_empty());
        assert!(summary.correlation_matrix.is_empty());
    }

    #[test]
    fn test_correlation_perfect_positive() {
        let df = df![
            "x" => [1.0, 2.0, 3.0, 4.0],
            "y" => [2.0, 4.0, 6.0, 8.0],
        ]
        .unwrap();

        let summary = StatisticalSummarizer::summarize(&df).unwrap();
        let r = summary.correlation("x", "y").unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_symmetry() {
        let df = df![
            "a" => [1.0, 5.0, 2.0, 8.0, 3.0],
            "b" => [2.0, 1.0, 7.0, 4.0, 6.0],
            "c" => [9.0, 3.0, 5.0, 1.0, 8.0],
        ]
        .unwrap();

        let summary = StatisticalSummarizer::summarize(&df).unwrap();
        let n = summary.columns.len();
        for i in 0..n {
            for j in 0..n {
                match (
                    summary.correlation_matrix[i][j],
                    summary.correlation_matrix[j][i],
                ) {
                    (Some(a), Some(b)) => assert!((a - b).abs() < 1e-12),
                    (None, None) => {}
                    other => panic!("Asymmetric entries: {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_zero_variance_column_undefined_everywhere() {
        let df = df![
            "constant" => [5.0, 5.0, 5.0, 5.0],
            "varying" => [1.0, 2.0, 3.0, 4.0],
        ]
        .unwrap();

        let summary = StatisticalSummarizer::summarize(&df).unwrap();
        // Undefined against the other column and on the diagonal
        assert_eq!(summary.correlation("constant", "varying"), None);
        assert_eq!(summary.correlation("constant", "constant"), None);
        // The varying column still has a defined diagonal
        assert_eq!(summary.correlation("varying", "varying"), Some(1.0));
    }

    #[test]
    fn test_correlation_pairwise_complete() {
        // Rows where either side is null are excluded from the pair
        let df = df![
            "x" => [Some(1.0), Some(2.0), None, Some(4.0)],
            "y" => [Some(2.0), Some(4.0), Some(100.0), Some(8.0)],
        ]
        .unwrap();

        let summary = StatisticalSummarizer::summarize(&df).unwrap();
        let r = summary.correlation("x", "y").unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_columns_preserve_original_order() {
        let df = df![
            "z" => [1.0, 2.0],
            "label" => ["a", "b"],
            "a" => [3.0, 4.0],
        ]
        .unwrap();

        let summary = StatisticalSummarizer::summarize(&df).unwrap();
        assert_eq!(summary.columns, vec!["z".to_string(), "a".to_string()]);
    }
}
