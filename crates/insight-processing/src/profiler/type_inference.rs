//! Type inference logic for column analysis.

use crate::types::ColumnType;
use crate::utils::{is_boolean_dtype, is_datetime_dtype, is_numeric_dtype};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// Date pattern regexes - compiled once at startup
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").expect("Invalid regex: YYYY-MM-DD"),
        Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}$").expect("Invalid regex: MM-DD-YYYY"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}").expect("Invalid regex: datetime"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("Invalid regex: ISO"),
    ]
});

/// How many non-null values to probe when deciding whether a string column
/// holds dates.
const SAMPLE_SIZE: usize = 20;

/// Infer the semantic type of a column from its dtype and, for string
/// columns, its content.
///
/// The mapping is a closed set: native numeric dtypes are `Numeric`,
/// booleans are `Boolean`, date/datetime/time dtypes are `Temporal`, and
/// string columns are `Temporal` when their sampled values match a date
/// pattern, otherwise `Textual`. Anything else falls back to `Textual`.
pub(crate) fn infer_column_type(series: &Series) -> PolarsResult<ColumnType> {
    let dtype = series.dtype();

    if is_numeric_dtype(dtype) {
        return Ok(ColumnType::Numeric);
    }
    if is_boolean_dtype(dtype) {
        return Ok(ColumnType::Boolean);
    }
    if is_datetime_dtype(dtype) {
        return Ok(ColumnType::Temporal);
    }

    if dtype == &DataType::String && is_date_like_column(series)? {
        return Ok(ColumnType::Temporal);
    }

    Ok(ColumnType::Textual)
}

/// Check whether a string column's sampled values all look like dates.
fn is_date_like_column(series: &Series) -> PolarsResult<bool> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return Ok(false);
    }

    let str_series = non_null.str()?;
    let mut checked = 0;

    for value in str_series.into_iter().flatten().take(SAMPLE_SIZE) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        checked += 1;
        if !DATE_PATTERNS.iter().any(|pattern| pattern.is_match(trimmed)) {
            return Ok(false);
        }
    }

    Ok(checked > 0)
}
