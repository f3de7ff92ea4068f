//! Evaluation helpers.
//!
//! Provides [`MetricValue`] for wrapping computed metrics with their display
//! name and direction, and [`evaluate`] for running one metric on one set.

use super::metrics::{EvalOrdering, MetricFn};
use super::output::OutputAdapter;
use crate::error::MetricError;

// =============================================================================
// MetricValue
// =============================================================================

/// A computed metric value with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricValue {
    /// Name of the metric (e.g., "train-binary_logloss", "valid-auc").
    pub name: String,
    /// The computed value.
    pub value: f64,
    /// Direction in which the metric improves.
    pub ordering: EvalOrdering,
}

impl MetricValue {
    /// Create a new metric value.
    pub fn new(name: impl Into<String>, value: f64, ordering: EvalOrdering) -> Self {
        Self {
            name: name.into(),
            value,
            ordering,
        }
    }

    /// Returns true if this value is better than another.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.ordering.is_better(self.value, other.value)
    }

    /// Returns true if this value is better than a raw value.
    pub fn is_better_than_value(&self, other_value: f64) -> bool {
        self.ordering.is_better(self.value, other_value)
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.6}", self.name, self.value)
    }
}

// =============================================================================
// evaluate
// =============================================================================

/// Evaluate `metric` and label each value as `"{set_name}-{metric_name}"`.
///
/// # Example
///
/// ```
/// use boosters_metrics::{evaluate, BinaryErrorMetric, Metadata, MetricConfig, MetricFn};
/// use ndarray::array;
///
/// let labels = array![1.0f32, 0.0, 1.0];
/// let mut metric = BinaryErrorMetric::new(&MetricConfig::default());
/// metric.init(Metadata::new(labels.view()), 3).unwrap();
///
/// let values = evaluate(&metric, "valid", &[0.9, 0.2, 0.4], None).unwrap();
/// assert_eq!(values[0].name, "valid-binary_error");
/// ```
pub fn evaluate<'a, M>(
    metric: &M,
    set_name: &str,
    scores: &[f64],
    output: Option<&dyn OutputAdapter>,
) -> Result<Vec<MetricValue>, MetricError>
where
    M: MetricFn<'a> + ?Sized,
{
    let values = metric.eval(scores, output)?;
    let ordering = metric.ordering();
    Ok(metric
        .names()
        .iter()
        .zip(values)
        .map(|(name, value)| MetricValue::new(format!("{}-{}", set_name, name), value, ordering))
        .collect())
}
