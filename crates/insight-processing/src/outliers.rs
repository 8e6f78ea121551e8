//! Outlier detection for numeric columns.
//!
//! Applies the interquartile-range rule per column: values strictly outside
//! `[Q1 - k*IQR, Q3 + k*IQR]` are flagged, with `k` taken from the config.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::types::{ColumnOutliers, OutlierReport};
use crate::utils::{is_numeric_dtype, numeric_values, quantile, sanitize_column_name, sorted_copy};
use polars::prelude::*;
use tracing::debug;

/// Flags rows outside IQR-based bounds, per numeric column independently.
pub struct OutlierDetector;

impl OutlierDetector {
    /// Detect outliers in every numeric column of a table.
    ///
    /// The report is sparse: columns with zero flagged rows are omitted, so
    /// a downstream visualization step can distinguish "nothing to plot"
    /// from "no numeric columns" (the latter via the schema profile).
    ///
    /// Percentages are relative to the whole table's row count, not the
    /// column's non-null count.
    ///
    /// A constant column has `IQR = 0` and bounds collapsing to Q1; any
    /// value different from Q1 is then flagged. That asymmetry is kept
    /// deliberately so reported counts stay stable across implementations.
    pub fn detect(df: &DataFrame, config: &AnalysisConfig) -> Result<OutlierReport> {
        let mut report = OutlierReport::default();
        let row_count = df.height();
        if row_count == 0 {
            return Ok(report);
        }

        for column in df.get_columns() {
            let series = column.as_materialized_series();
            if !is_numeric_dtype(series.dtype()) {
                continue;
            }

            let values = numeric_values(series)?;
            if values.is_empty() {
                continue;
            }

            let sorted = sorted_copy(&values);
            // Non-empty input, so the quantiles exist.
            let q1 = quantile(&sorted, 0.25).unwrap_or(sorted[0]);
            let q3 = quantile(&sorted, 0.75).unwrap_or(sorted[sorted.len() - 1]);
            let iqr = q3 - q1;
            let lower_bound = q1 - config.outlier_multiplier * iqr;
            let upper_bound = q3 + config.outlier_multiplier * iqr;

            let count = values
                .iter()
                .filter(|&&v| v < lower_bound || v > upper_bound)
                .count();

            if count == 0 {
                continue;
            }

            let name = sanitize_column_name(series.name());
            debug!(
                "Column '{}': {} outliers outside [{:.4}, {:.4}]",
                name, count, lower_bound, upper_bound
            );

            report.columns.insert(
                name,
                ColumnOutliers {
                    count,
                    percentage: (count as f64 / row_count as f64) * 100.0,
                    lower_bound,
                    upper_bound,
                },
            );
        }

        Ok(report)
    }
}
