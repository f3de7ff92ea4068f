//! View types for metric access.
//!
//! These provide read-only access to labels and weights. Labels are binary
//! encoded: values `<= 0` are negatives, values `> 0` are positives.

use ndarray::ArrayView1;

use crate::error::MetricError;

// =============================================================================
// WeightsView
// =============================================================================

/// Optional per-sample weights.
///
/// ```
/// use boosters_metrics::WeightsView;
/// use ndarray::array;
///
/// let weights = array![1.0f32, 2.0, 0.5];
/// let view = WeightsView::from_optional(Some(weights.view()));
/// assert!(matches!(view, WeightsView::Some(_)));
/// assert!(matches!(WeightsView::default(), WeightsView::None));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub enum WeightsView<'a> {
    /// No weights - all samples have implicit weight 1.0.
    #[default]
    None,
    /// Explicit weights per sample.
    Some(ArrayView1<'a, f32>),
}

impl<'a> WeightsView<'a> {
    #[inline]
    pub fn from_array(weights: ArrayView1<'a, f32>) -> Self {
        WeightsView::Some(weights)
    }

    #[inline]
    pub fn from_optional(weights: Option<ArrayView1<'a, f32>>) -> Self {
        weights.map_or(WeightsView::None, WeightsView::Some)
    }

    /// Number of explicit weights, `None` for uniform weights.
    #[inline]
    fn n_weights(&self) -> Option<usize> {
        match self {
            WeightsView::None => None,
            WeightsView::Some(w) => Some(w.len()),
        }
    }
}

// =============================================================================
// Metadata
// =============================================================================

/// Labels and optional weights of one evaluation set.
///
/// A metric initialized from `Metadata<'a>` borrows both arrays for `'a`, so
/// the owning dataset cannot be dropped or mutated while the metric is alive.
#[derive(Clone, Copy, Debug)]
pub struct Metadata<'a> {
    labels: ArrayView1<'a, f32>,
    weights: WeightsView<'a>,
}

impl<'a> Metadata<'a> {
    /// Unweighted metadata.
    pub fn new(labels: ArrayView1<'a, f32>) -> Self {
        Self {
            labels,
            weights: WeightsView::None,
        }
    }

    /// Metadata with explicit weights.
    pub fn with_weights(labels: ArrayView1<'a, f32>, weights: WeightsView<'a>) -> Self {
        Self { labels, weights }
    }

    #[inline]
    pub fn labels(&self) -> ArrayView1<'a, f32> {
        self.labels
    }

    #[inline]
    pub fn weights(&self) -> WeightsView<'a> {
        self.weights
    }

    /// Check that labels and weights both cover exactly `num_data` samples.
    pub fn validate(&self, num_data: usize) -> Result<(), MetricError> {
        if self.labels.len() != num_data {
            return Err(MetricError::LengthMismatch {
                what: "labels",
                expected: num_data,
                actual: self.labels.len(),
            });
        }
        if let Some(n) = self.weights.n_weights() {
            if n != num_data {
                return Err(MetricError::LengthMismatch {
                    what: "weights",
                    expected: num_data,
                    actual: n,
                });
            }
        }
        Ok(())
    }
}
