//! Evaluation infrastructure used during and after training.
//!
//! ## Metrics
//!
//! - [`BinaryLoglossMetric`], [`BinaryErrorMetric`]: weighted mean pointwise losses
//! - [`AucMetric`]: weighted, tie-aware area under the ROC curve
//!
//! ## Output adapters
//!
//! - [`OutputAdapter`]: raw score to probability conversion
//! - [`LogisticOutput`]: sigmoid conversion of binary logistic objectives
//! - [`WithExternalModel`]: attaches an [`ExternalModel`] whose predictions
//!   replace raw scores at evaluation time
//!
//! ## Configuration
//!
//! - [`MetricConfig`]: threading for metric evaluation

mod config;
mod eval;
mod metrics;
mod output;

pub use config::{MetricConfig, DEFAULT_MIN_ROWS_PER_THREAD};
pub use eval::{evaluate, MetricValue};
pub use metrics::{
    AucMetric, BinaryError, BinaryErrorMetric, BinaryLogloss, BinaryLoglossMetric, BinaryMetric,
    EvalOrdering, MetricFn, PointwiseLoss, LOG_EPSILON,
};
pub use output::{ExternalModel, LogisticOutput, OutputAdapter, ScoreTransform, WithExternalModel};
