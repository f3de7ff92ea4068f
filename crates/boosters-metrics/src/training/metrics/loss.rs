//! Pointwise losses for binary classification.
//!
//! A [`PointwiseLoss`] scores one instance from its label and predicted
//! probability. [`BinaryMetric`](super::BinaryMetric) turns any of them into a
//! weighted mean over the evaluation set.

use super::is_positive;

/// Probabilities closer than this to the wrong class are clamped before `ln`.
pub const LOG_EPSILON: f64 = 1e-15;

/// Loss of a single instance.
///
/// Implementors are stateless marker types, so the aggregator loop is
/// monomorphized per loss.
pub trait PointwiseLoss: Send + Sync + 'static {
    /// Name of the metric (for logging).
    const NAME: &'static str;

    /// Loss for one instance. `label <= 0` is negative, `label > 0` positive.
    fn loss_on_point(label: f32, prob: f64) -> f64;
}

// =============================================================================
// BinaryLogloss
// =============================================================================

/// Binary cross-entropy: `-ln(p)` for positives, `-ln(1 - p)` for negatives.
///
/// The probability of the true class is floored at [`LOG_EPSILON`], so the
/// loss never exceeds `-ln(LOG_EPSILON)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryLogloss;

impl PointwiseLoss for BinaryLogloss {
    const NAME: &'static str = "binary_logloss";

    #[inline]
    fn loss_on_point(label: f32, prob: f64) -> f64 {
        let p_true = if is_positive(label) { prob } else { 1.0 - prob };
        if p_true > LOG_EPSILON {
            -p_true.ln()
        } else {
            -LOG_EPSILON.ln()
        }
    }
}

// =============================================================================
// BinaryError
// =============================================================================

/// Misclassification indicator at threshold 0.5.
///
/// `p <= 0.5` predicts negative, anything else (including NaN) predicts
/// positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryError;

impl PointwiseLoss for BinaryError {
    const NAME: &'static str = "binary_error";

    #[inline]
    fn loss_on_point(label: f32, prob: f64) -> f64 {
        let wrong = if prob <= 0.5 {
            is_positive(label)
        } else {
            !is_positive(label)
        };
        if wrong {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::DEFAULT_TOLERANCE;
    use approx::assert_abs_diff_eq;

    #[test]
    fn logloss_positive_and_negative() {
        assert_abs_diff_eq!(
            BinaryLogloss::loss_on_point(1.0, 0.8),
            -(0.8f64).ln(),
            epsilon = DEFAULT_TOLERANCE
        );
        assert_abs_diff_eq!(
            BinaryLogloss::loss_on_point(0.0, 0.8),
            -(0.2f64).ln(),
            epsilon = DEFAULT_TOLERANCE
        );
    }

    #[test]
    fn logloss_clamps_saturated_probabilities() {
        let cap = -LOG_EPSILON.ln();
        assert_eq!(BinaryLogloss::loss_on_point(1.0, 0.0), cap);
        assert_eq!(BinaryLogloss::loss_on_point(0.0, 1.0), cap);
        assert_eq!(BinaryLogloss::loss_on_point(1.0, -0.5), cap);
        assert!(BinaryLogloss::loss_on_point(1.0, 1.0) == 0.0);
    }

    #[test]
    fn logloss_treats_nonpositive_labels_as_negative() {
        assert_eq!(
            BinaryLogloss::loss_on_point(-1.0, 0.3),
            BinaryLogloss::loss_on_point(0.0, 0.3)
        );
    }

    #[test]
    fn error_threshold_boundary() {
        // 0.5 itself predicts negative.
        assert_eq!(BinaryError::loss_on_point(1.0, 0.5), 1.0);
        assert_eq!(BinaryError::loss_on_point(0.0, 0.5), 0.0);
        assert_eq!(BinaryError::loss_on_point(1.0, 0.51), 0.0);
        assert_eq!(BinaryError::loss_on_point(0.0, 0.51), 1.0);
    }

    #[test]
    fn error_nan_probability_predicts_positive() {
        assert_eq!(BinaryError::loss_on_point(1.0, f64::NAN), 0.0);
        assert_eq!(BinaryError::loss_on_point(0.0, f64::NAN), 1.0);
    }

    #[test]
    fn names() {
        assert_eq!(BinaryLogloss::NAME, "binary_logloss");
        assert_eq!(BinaryError::NAME, "binary_error");
    }
}
