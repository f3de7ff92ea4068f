//! Evaluation metrics for binary classification.
//!
//! Metrics are separate from objectives: a model trained with one loss can be
//! monitored with any of these.
//!
//! # Lifecycle
//!
//! 1. Construct with `::new(&MetricConfig)`.
//! 2. Call [`MetricFn::init`] exactly once with the evaluation set's
//!    [`Metadata`]. The metric borrows the label and weight arrays from then on.
//! 3. Call [`MetricFn::eval`] once per round with that round's raw scores.
//!
//! # Weighted Evaluation
//!
//! Weights come from the metadata. Without weights every instance counts 1.0
//! and the total weight is the instance count.
//!
//! # Available Metrics
//!
//! - [`BinaryLoglossMetric`]: Binary cross-entropy ("binary_logloss")
//! - [`BinaryErrorMetric`]: Misclassification rate at 0.5 ("binary_error")
//! - [`AucMetric`]: Area Under ROC Curve ("auc")

mod auc;
mod binary;
mod loss;

pub use auc::AucMetric;
pub use binary::{BinaryErrorMetric, BinaryLoglossMetric, BinaryMetric};
pub use loss::{BinaryError, BinaryLogloss, PointwiseLoss, LOG_EPSILON};

use ndarray::ArrayView1;

use super::output::OutputAdapter;
use crate::data::{Metadata, WeightsView};
use crate::error::MetricError;

// =============================================================================
// EvalOrdering
// =============================================================================

/// Direction in which a metric improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalOrdering {
    HigherIsBetter,
    LowerIsBetter,
}

impl EvalOrdering {
    /// `1.0` if higher is better, `-1.0` otherwise.
    ///
    /// Multiplying a metric value by this factor makes bigger always better.
    #[inline]
    pub fn factor_to_bigger_better(self) -> f64 {
        match self {
            Self::HigherIsBetter => 1.0,
            Self::LowerIsBetter => -1.0,
        }
    }

    /// Returns true if `a` is strictly better than `b`.
    #[inline]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Self::HigherIsBetter => a > b,
            Self::LowerIsBetter => a < b,
        }
    }
}

// =============================================================================
// Metric Trait
// =============================================================================

/// A metric for evaluating model quality.
///
/// `'a` is the lifetime of the label and weight arrays bound by
/// [`init`](Self::init). Scores are only borrowed for the duration of one
/// [`eval`](Self::eval) call.
///
/// `eval` takes `&self` and parallelizes internally. Independent metric
/// instances may be evaluated concurrently.
pub trait MetricFn<'a>: Send + Sync {
    /// Bind label and weight views and cache the total weight.
    ///
    /// # Errors
    ///
    /// - [`MetricError::AlreadyInitialized`] on a second call.
    /// - [`MetricError::LengthMismatch`] if labels or weights do not have
    ///   `num_data` entries.
    fn init(&mut self, metadata: Metadata<'a>, num_data: usize) -> Result<(), MetricError>;

    /// Display names, one per value returned by `eval`.
    fn names(&self) -> &[String];

    /// Whether higher or lower values are better.
    fn ordering(&self) -> EvalOrdering;

    /// Compute the metric for one round of raw scores.
    ///
    /// `output` converts raw scores to probabilities. `None` means the scores
    /// already are probabilities.
    ///
    /// # Errors
    ///
    /// - [`MetricError::NotInitialized`] before `init`.
    /// - [`MetricError::LengthMismatch`] if `scores.len() != num_data`.
    /// - [`MetricError::ExternalModelOnTrainingData`] on a configuration conflict.
    fn eval(
        &self,
        scores: &[f64],
        output: Option<&dyn OutputAdapter>,
    ) -> Result<Vec<f64>, MetricError>;

    /// Mark this metric as evaluating the training data itself.
    ///
    /// Only metrics that consult the output adapter care. Default: ignored.
    fn set_training_data(&mut self, _is_training_data: bool) {}
}

// =============================================================================
// Bound evaluation data
// =============================================================================

/// Label and weight views captured by `init`.
#[derive(Debug, Clone, Copy)]
struct BoundData<'a> {
    labels: ArrayView1<'a, f32>,
    weights: WeightsView<'a>,
    num_data: usize,
    /// Sum of weights, or `num_data` when unweighted. Fixed after `init`.
    sum_weights: f64,
}

impl<'a> BoundData<'a> {
    fn bind(
        slot: &mut Option<BoundData<'a>>,
        metadata: Metadata<'a>,
        num_data: usize,
        metric: &'static str,
    ) -> Result<(), MetricError> {
        if slot.is_some() {
            return Err(MetricError::AlreadyInitialized { metric });
        }
        metadata.validate(num_data)?;

        let weights = metadata.weights();
        let sum_weights = match weights {
            WeightsView::None => num_data as f64,
            WeightsView::Some(w) => {
                debug_assert!(w.iter().all(|&x| x >= 0.0), "weights must be non-negative");
                w.iter().map(|&x| f64::from(x)).sum()
            }
        };

        tracing::debug!(
            metric,
            num_data,
            sum_weights,
            weighted = matches!(weights, WeightsView::Some(_)),
            "metric initialized"
        );

        *slot = Some(BoundData {
            labels: metadata.labels(),
            weights,
            num_data,
            sum_weights,
        });
        Ok(())
    }

    fn get(slot: &Option<BoundData<'a>>, metric: &'static str) -> Result<Self, MetricError> {
        slot.ok_or(MetricError::NotInitialized { metric })
    }

    fn check_scores(&self, scores: &[f64]) -> Result<(), MetricError> {
        if scores.len() != self.num_data {
            return Err(MetricError::LengthMismatch {
                what: "scores",
                expected: self.num_data,
                actual: scores.len(),
            });
        }
        Ok(())
    }
}

#[inline]
fn is_positive(label: f32) -> bool {
    label > 0.0
}
