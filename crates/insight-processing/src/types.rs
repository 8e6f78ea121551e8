use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Semantic type of a column, inferred at runtime from its dtype and content.
///
/// This is a closed set; every column maps to exactly one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Integer or floating point values; supports arithmetic.
    Numeric,
    /// Free-form or categorical text.
    Textual,
    /// Boolean values.
    Boolean,
    /// Dates, datetimes, or string columns whose content parses as dates.
    Temporal,
}

impl ColumnType {
    /// Whether columns of this type participate in statistics and clustering.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Numeric => "numeric",
            Self::Textual => "textual",
            Self::Boolean => "boolean",
            Self::Temporal => "temporal",
        };
        write!(f, "{}", s)
    }
}

/// Structural profile of a table: shape, types, missingness, cardinality.
///
/// Keys are sanitized (ASCII-only) column names; see
/// [`crate::utils::sanitize_column_name`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaProfile {
    pub row_count: usize,
    pub column_count: usize,
    pub column_types: HashMap<String, ColumnType>,
    pub missing_counts: HashMap<String, usize>,
    pub unique_counts: HashMap<String, usize>,
}

/// Descriptive statistics for one numeric column, computed over non-null
/// (and non-NaN) values.
///
/// Fields are `None` when the statistic is undefined for the observed
/// values: everything but `count` when the column has no valid values, and
/// `std` additionally when `count < 2` (sample variance needs N-1 > 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

/// Descriptive statistics and correlations over the numeric columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticalSummary {
    /// Numeric column names in original table order. Indexes the rows and
    /// columns of `correlation_matrix`.
    pub columns: Vec<String>,
    pub per_column_stats: HashMap<String, ColumnStats>,
    /// Pairwise Pearson coefficients; `None` marks an undefined coefficient
    /// (zero variance on the pairwise-complete rows). Symmetric.
    pub correlation_matrix: Vec<Vec<Option<f64>>>,
}

impl StatisticalSummary {
    /// An empty summary, the valid result for a table with no numeric columns.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            per_column_stats: HashMap::new(),
            correlation_matrix: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a correlation coefficient by column names.
    pub fn correlation(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.correlation_matrix[i][j]
    }
}

/// Outlier bounds and counts for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnOutliers {
    pub count: usize,
    /// Share of the whole table's rows, in [0, 100]. Computed against the
    /// full row count, not the column's non-null count.
    pub percentage: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Sparse per-column outlier report.
///
/// Only columns with at least one flagged row appear; an empty report on a
/// table with numeric columns means no outliers, which is distinguishable
/// from "no numeric columns" via the schema profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlierReport {
    pub columns: HashMap<String, ColumnOutliers>,
}

impl OutlierReport {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&ColumnOutliers> {
        self.columns.get(column)
    }
}

/// Cluster labels and 2-D projection coordinates, indexed by original row
/// position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterAssignment {
    /// One label per row, in `0..cluster_count`.
    pub labels: Vec<u32>,
    /// Principal-component coordinates per row, for visualization only.
    pub projection: Vec<[f64; 2]>,
}

impl ClusterAssignment {
    /// Number of distinct labels actually assigned.
    pub fn distinct_clusters(&self) -> usize {
        let mut seen: Vec<u32> = self.labels.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}
