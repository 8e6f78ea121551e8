//! Exploratory Tabular Analysis Library
//!
//! Profiles, summarizes, and clusters arbitrary tabular datasets built on
//! Rust and Polars.
//!
//! # Overview
//!
//! Given one in-memory `DataFrame` of unknown shape, this library provides
//! four independent analyses:
//!
//! - **Schema Profiling**: shape, runtime-inferred column types, missing
//!   counts, cardinality ([`SchemaProfiler`])
//! - **Statistical Summaries**: descriptive statistics and a pairwise
//!   Pearson correlation matrix over numeric columns ([`StatisticalSummarizer`])
//! - **Outlier Detection**: per-column IQR rule with configurable bounds
//!   ([`OutlierDetector`])
//! - **Cluster Analysis**: median imputation, standardization, 2-D PCA
//!   projection, and seeded k-means ([`ClusterAnalyzer`])
//!
//! plus report assembly ([`ReportGenerator`]) and optional LLM narrative
//! generation (the [`narrative`] module, behind the default-on `ai`
//! feature).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use insight_processing::{AnalysisConfig, ReportGenerator, ingest};
//!
//! let df = ingest::load_csv("data.csv")?;
//! let config = AnalysisConfig::default();
//!
//! let report = ReportGenerator::generate(&df, &config)?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```
//!
//! The four analyses can also run individually; each takes the table
//! read-only and returns an owned result value:
//!
//! ```rust,ignore
//! use insight_processing::{ClusterAnalyzer, OutlierDetector, SchemaProfiler, StatisticalSummarizer};
//!
//! let schema = SchemaProfiler::profile(&df)?;
//! let summary = StatisticalSummarizer::summarize(&df)?;
//! let outliers = OutlierDetector::detect(&df, &config)?;
//! let clusters = ClusterAnalyzer::analyze(&df, &config)?;
//! ```
//!
//! # Degenerate Inputs
//!
//! Real-world tables routinely hit edge cases, and most are valid results
//! rather than errors: a table with no numeric columns yields an empty
//! summary, a zero-variance column yields `null` correlation entries, and
//! a column with no outliers is simply absent from the outlier report.
//! Clustering is the exception: fewer than 2 numeric columns or an
//! entirely-null numeric column fails with a dedicated
//! [`AnalysisError`] variant, and hosts are expected to omit the cluster
//! section in that case (see [`AnalysisError::is_cluster_skip`]).

// Core modules
pub mod cluster;
pub mod config;
pub mod error;
pub mod ingest;
#[cfg(feature = "ai")]
pub mod narrative;
pub mod outliers;
pub mod profiler;
pub mod report;
pub mod stats;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cluster::{ClusterAnalyzer, KMeans};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use outliers::OutlierDetector;
pub use profiler::SchemaProfiler;
pub use report::{AnalysisReport, MissingValueEntry, ReportGenerator};
pub use stats::StatisticalSummarizer;
pub use types::{
    ClusterAssignment, ColumnOutliers, ColumnStats, ColumnType, OutlierReport, SchemaProfile,
    StatisticalSummary,
};

#[cfg(feature = "ai")]
pub use narrative::{NarrativeProvider, OpenAiProvider};
