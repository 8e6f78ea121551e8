//! Schema profiling module for dataset analysis.
//!
//! This module inspects a parsed table and reports shape, per-column
//! inferred type, missing-value counts, and cardinality.

mod type_inference;

use crate::error::{AnalysisError, Result};
use crate::types::SchemaProfile;
use crate::utils::{missing_count, sanitize_column_name};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

pub(crate) use type_inference::infer_column_type;

/// Schema profiler for analyzing dataset structure.
pub struct SchemaProfiler;

impl SchemaProfiler {
    /// Profile a table's structure.
    ///
    /// Pure function of the table snapshot: shape, runtime-inferred column
    /// types, missing counts (nulls and NaNs), and distinct non-null counts.
    /// Map keys are ASCII-sanitized column names.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidTable`] if any column's length differs
    /// from the table height. Polars enforces this invariant on well-formed
    /// frames, so the check is defensive.
    pub fn profile(df: &DataFrame) -> Result<SchemaProfile> {
        let row_count = df.height();
        let column_count = df.width();

        let mut column_types = HashMap::with_capacity(column_count);
        let mut missing_counts = HashMap::with_capacity(column_count);
        let mut unique_counts = HashMap::with_capacity(column_count);

        for column in df.get_columns() {
            let series = column.as_materialized_series();

            if series.len() != row_count {
                return Err(AnalysisError::InvalidTable {
                    column: series.name().to_string(),
                    expected: row_count,
                    actual: series.len(),
                });
            }

            let name = sanitize_column_name(series.name());
            let inferred = infer_column_type(series)?;
            debug!("Column '{}' inferred as {}", name, inferred);

            column_types.insert(name.clone(), inferred);
            missing_counts.insert(name.clone(), missing_count(series));
            unique_counts.insert(name, series.drop_nulls().n_unique()?);
        }

        Ok(SchemaProfile {
            row_count,
            column_count,
            column_types,
            missing_counts,
            unique_counts,
        })
    }
}
