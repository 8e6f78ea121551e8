//! Custom error types for the analysis pipeline.
//!
//! This module provides the error hierarchy using `thiserror`.
//!
//! Errors are serializable as `{code, message}` pairs so hosts can forward
//! them to a UI or log sink without losing the category.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The table violates its row-length invariant (ragged columns).
    #[error("Invalid table: column '{column}' has {actual} rows, expected {expected}")]
    InvalidTable {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Fewer than 2 numeric columns; clustering cannot project to 2 components.
    #[error("Insufficient features for clustering: {found} numeric columns, need at least 2")]
    InsufficientFeatures { found: usize },

    /// A numeric column is entirely null; its median is undefined.
    #[error("Column '{0}' is entirely missing; median imputation is undefined")]
    AllMissingColumn(String),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Narrative provider error.
    #[error("Narrative provider error: {0}")]
    NarrativeError(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error (narrative provider, only with "ai" feature).
    #[cfg(feature = "ai")]
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for host-side handling.
    ///
    /// Hosts can branch on these codes to handle specific error types
    /// differently (e.g., skipping the cluster section of a report when
    /// clustering was not meaningful for the dataset).
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTable { .. } => "INVALID_TABLE",
            Self::InsufficientFeatures { .. } => "INSUFFICIENT_FEATURES",
            Self::AllMissingColumn(_) => "ALL_MISSING_COLUMN",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::NarrativeError(_) => "NARRATIVE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            #[cfg(feature = "ai")]
            Self::HttpRequest(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means clustering was skipped rather than broken.
    ///
    /// `InsufficientFeatures` and `AllMissingColumn` describe properties of
    /// the dataset, not faults in the pipeline; the host should omit the
    /// cluster assignment and continue.
    pub fn is_cluster_skip(&self) -> bool {
        match self {
            Self::InsufficientFeatures { .. } | Self::AllMissingColumn(_) => true,
            Self::WithContext { source, .. } => source.is_cluster_skip(),
            _ => false,
        }
    }
}

/// Serialize implementation for forwarding errors across process boundaries.
///
/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for AnalysisError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalysisError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}
