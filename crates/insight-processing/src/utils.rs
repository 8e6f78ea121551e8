//! Shared utilities for the analysis pipeline.
//!
//! This module contains common helper functions used across multiple modules
//! to reduce code duplication and ensure consistency.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Check if a DataType is boolean.
#[inline]
pub fn is_boolean_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Boolean)
}

// =============================================================================
// Column Name Utilities
// =============================================================================

/// Sanitize a column name to the ASCII subset.
///
/// Non-ASCII bytes are dropped, not substituted. Downstream consumers key
/// JSON-style maps by these names and must not diverge over encoding.
pub fn sanitize_column_name(name: &str) -> String {
    name.chars().filter(char::is_ascii).collect()
}

// =============================================================================
// Numeric Value Extraction
// =============================================================================

/// Extract the valid numeric values of a series, in row order.
///
/// Nulls and NaNs are both treated as missing; every statistic in this
/// crate is defined "over non-null values", so filtering happens here
/// rather than relying on library NaN-skipping defaults.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// Extract a series as per-row `Option<f64>`, mapping NaN to `None`.
pub fn numeric_values_with_nulls(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Count missing entries (nulls, plus NaNs for float columns) in a series.
pub fn missing_count(series: &Series) -> usize {
    let nulls = series.null_count();
    if !matches!(series.dtype(), DataType::Float32 | DataType::Float64) {
        return nulls;
    }
    match series.cast(&DataType::Float64).and_then(|s| s.f64().cloned()) {
        Ok(ca) => nulls + ca.into_iter().flatten().filter(|v| v.is_nan()).count(),
        Err(_) => nulls,
    }
}

// =============================================================================
// Descriptive Statistics
// =============================================================================

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (denominator N-1); `None` when fewer than
/// 2 values are present.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Quantile via linear interpolation between order statistics.
///
/// `q` is in [0, 1]. Input must be sorted ascending. Returns `None` for an
/// empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    if sorted.len() == 1 {
        return Some(sorted[0]);
    }

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

/// Sort a copy of the values ascending. NaNs must already be filtered out.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

// =============================================================================
// Tests
// =============================================================================
