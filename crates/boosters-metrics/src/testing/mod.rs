//! Testing utilities for boosters-metrics.
//!
//! Shared tolerances, small fixtures and synthetic data generators used by
//! unit tests, integration tests and benchmarks.
//!
//! ```ignore
//! use boosters_metrics::testing::{DEFAULT_TOLERANCE, ScaledExternalModel};
//! ```

mod data;

pub use data::synthetic_binary;

use crate::error::MetricError;
use crate::training::ExternalModel;

// =============================================================================
// Constants
// =============================================================================

/// Default tolerance for floating point comparisons of metric values.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Looser tolerance for comparing parallel and sequential reductions.
pub const REDUCTION_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Fixtures
// =============================================================================

/// External model that maps every score through `1 / (1 + exp(-scale * x))`.
///
/// Stands in for a fitted probabilistic model in tests and benchmarks.
#[derive(Debug, Clone, Copy)]
pub struct ScaledExternalModel {
    pub scale: f64,
}

impl ExternalModel for ScaledExternalModel {
    fn predict(&self, scores: &[f64]) -> Result<Vec<f64>, MetricError> {
        Ok(scores
            .iter()
            .map(|&x| 1.0 / (1.0 + (-self.scale * x).exp()))
            .collect())
    }
}

/// External model that always returns a fixed prediction vector.
#[derive(Debug, Clone)]
pub struct FixedExternalModel {
    pub predictions: Vec<f64>,
}

impl ExternalModel for FixedExternalModel {
    fn predict(&self, _scores: &[f64]) -> Result<Vec<f64>, MetricError> {
        Ok(self.predictions.clone())
    }
}

/// External model whose prediction always fails.
#[derive(Debug, Clone, Copy)]
pub struct FailingExternalModel;

impl ExternalModel for FailingExternalModel {
    fn predict(&self, _scores: &[f64]) -> Result<Vec<f64>, MetricError> {
        Err(MetricError::ExternalModel("model not fitted".into()))
    }
}
