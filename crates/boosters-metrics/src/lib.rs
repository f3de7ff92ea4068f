//! boosters-metrics: binary classification evaluation metrics.
//!
//! Scalar metrics computed on raw model scores during and after training:
//! log-loss, error rate and the area under the ROC curve.
//!
//! # Key Types
//!
//! - [`MetricFn`] - The metric contract (`init`, `names`, `ordering`, `eval`)
//! - [`BinaryLoglossMetric`] / [`BinaryErrorMetric`] - Weighted mean pointwise losses
//! - [`AucMetric`] - Weighted, tie-aware AUC
//! - [`OutputAdapter`] - Converts raw scores to probabilities, optionally through
//!   an attached [`ExternalModel`]
//! - [`Metadata`] - Borrowed label and weight views
//!
//! # Example
//!
//! ```
//! use boosters_metrics::{
//!     AucMetric, LogisticOutput, Metadata, MetricConfig, MetricFn, BinaryLoglossMetric,
//! };
//! use ndarray::array;
//!
//! let labels = array![1.0f32, 0.0, 1.0, 0.0];
//! let scores = [2.0, -1.0, 0.5, -3.0];
//! let config = MetricConfig::default();
//!
//! let mut logloss = BinaryLoglossMetric::new(&config);
//! logloss.init(Metadata::new(labels.view()), labels.len()).unwrap();
//! let value = logloss.eval(&scores, Some(&LogisticOutput::default())).unwrap();
//! assert!(value[0] > 0.0);
//!
//! let mut auc = AucMetric::new(&config);
//! auc.init(Metadata::new(labels.view()), labels.len()).unwrap();
//! assert_eq!(auc.eval(&scores, None).unwrap(), vec![1.0]);
//! ```

pub mod data;
pub mod error;
pub mod testing;
pub mod training;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{Metadata, WeightsView};
pub use error::{ConfigError, MetricError};
pub use training::{
    evaluate, AucMetric, BinaryError, BinaryErrorMetric, BinaryLogloss, BinaryLoglossMetric,
    BinaryMetric, EvalOrdering, ExternalModel, LogisticOutput, MetricConfig, MetricFn,
    MetricValue, OutputAdapter, PointwiseLoss, ScoreTransform, WithExternalModel,
};
pub use utils::Parallelism;
