//! Configuration types for the analysis pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! Policy values the analyses depend on (outlier bound multiplier, cluster
//! count, random seed) live here rather than as ambient state, so two runs
//! with the same config and input produce the same results.

use serde::{Deserialize, Serialize};

/// Configuration for the analysis pipeline.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use insight_processing::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .cluster_count(3)
///     .seed(42)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Multiplier applied to the IQR when computing outlier bounds.
    /// Default: 1.5
    pub outlier_multiplier: f64,

    /// Number of clusters for k-means.
    /// Default: 3
    pub cluster_count: usize,

    /// Seed for the k-means centroid initialization RNG.
    /// Default: 42
    pub seed: u64,

    /// Iteration cap for k-means; convergence usually happens much earlier.
    /// Default: 300
    pub max_iterations: usize,

    /// Number of head rows included in the narrative prompt as sample data.
    /// Default: 3
    pub narrative_sample_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            outlier_multiplier: 1.5,
            cluster_count: 3,
            seed: 42,
            max_iterations: 300,
            narrative_sample_rows: 3,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.outlier_multiplier.is_finite() || self.outlier_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidOutlierMultiplier(
                self.outlier_multiplier,
            ));
        }

        if self.cluster_count == 0 {
            return Err(ConfigValidationError::InvalidClusterCount(
                self.cluster_count,
            ));
        }

        if self.max_iterations == 0 {
            return Err(ConfigValidationError::InvalidMaxIterations(
                self.max_iterations,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid outlier multiplier: {0} (must be a positive finite number)")]
    InvalidOutlierMultiplier(f64),

    #[error("Invalid cluster count: {0} (must be at least 1)")]
    InvalidClusterCount(usize),

    #[error("Invalid iteration cap: {0} (must be at least 1)")]
    InvalidMaxIterations(usize),
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Set the IQR multiplier for outlier bounds.
    pub fn outlier_multiplier(mut self, multiplier: f64) -> Self {
        self.config.outlier_multiplier = multiplier;
        self
    }

    /// Set the number of k-means clusters.
    pub fn cluster_count(mut self, count: usize) -> Self {
        self.config.cluster_count = count;
        self
    }

    /// Set the RNG seed for centroid initialization.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the k-means iteration cap.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the number of sample rows for the narrative prompt.
    pub fn narrative_sample_rows(mut self, rows: usize) -> Self {
        self.config.narrative_sample_rows = rows;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
