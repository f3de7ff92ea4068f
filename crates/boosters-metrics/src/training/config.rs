//! Metric configuration with builder pattern.
//!
//! [`MetricConfig`] is shared by every metric constructor. It only controls
//! resources; metric semantics are fixed by the metric type.
//!
//! # Example
//!
//! ```
//! use boosters_metrics::MetricConfig;
//!
//! // All defaults
//! let config = MetricConfig::builder().build().unwrap();
//!
//! // Force sequential evaluation
//! let config = MetricConfig::builder().n_threads(1).build().unwrap();
//! assert!(!config.parallelism().is_parallel());
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::utils::Parallelism;

/// Default minimum number of rows each worker thread must receive.
pub const DEFAULT_MIN_ROWS_PER_THREAD: usize = 4096;

/// Resource configuration for metric evaluation.
///
/// Deserialized configs bypass the builder; call [`MetricConfig::validate`]
/// on them before use.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
#[serde(default)]
pub struct MetricConfig {
    /// Number of threads. `0` = auto, `1` = sequential. Default: 0.
    #[builder(default = 0)]
    pub n_threads: usize,

    /// Workloads giving fewer rows than this to each thread run sequentially.
    /// Default: 4096.
    #[builder(default = DEFAULT_MIN_ROWS_PER_THREAD)]
    pub min_rows_per_thread: usize,
}

impl<S: metric_config_builder::IsComplete> MetricConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMinRowsPerThread`] if `min_rows_per_thread == 0`.
    pub fn build(self) -> Result<MetricConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl MetricConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_rows_per_thread == 0 {
            return Err(ConfigError::InvalidMinRowsPerThread(self.min_rows_per_thread));
        }
        Ok(())
    }

    /// Parallelism hint derived from `n_threads`.
    pub fn parallelism(&self) -> Parallelism {
        Parallelism::from_threads(self.n_threads)
    }
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            n_threads: 0,
            min_rows_per_thread: DEFAULT_MIN_ROWS_PER_THREAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default() {
        let built = MetricConfig::builder().build().unwrap();
        assert_eq!(built, MetricConfig::default());
    }

    #[test]
    fn builder_rejects_zero_rows_per_thread() {
        let err = MetricConfig::builder().min_rows_per_thread(0).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidMinRowsPerThread(0));
    }

    #[test]
    fn sequential_config() {
        let config = MetricConfig::builder().n_threads(1).build().unwrap();
        assert_eq!(config.parallelism(), Parallelism::Sequential);
    }

    #[test]
    fn deserialize_fills_defaults() {
        let config: MetricConfig = serde_json::from_str(r#"{"n_threads": 1}"#).unwrap();
        assert_eq!(config.n_threads, 1);
        assert_eq!(config.min_rows_per_thread, DEFAULT_MIN_ROWS_PER_THREAD);
        assert!(config.validate().is_ok());

        let bad: MetricConfig = serde_json::from_str(r#"{"min_rows_per_thread": 0}"#).unwrap();
        assert!(bad.validate().is_err());
    }
}
