//! Output adapters: turning raw model scores into probabilities.
//!
//! An [`OutputAdapter`] is supplied by the objective side of training. It
//! converts a raw margin into a probability and may carry an
//! [`ExternalModel`] (for example a Gaussian process fitted on the boosting
//! residuals) whose predictions replace the raw scores at evaluation time.
//!
//! Metrics never branch on the adapter per instance. They resolve a
//! [`ScoreTransform`] once per `eval` call and run one loop per variant.

use crate::error::{ConfigError, MetricError};

// =============================================================================
// Traits
// =============================================================================

/// A probabilistic model attached to the objective.
pub trait ExternalModel: Send + Sync {
    /// Predict one corrected probability per instance from the full raw score
    /// array.
    fn predict(&self, scores: &[f64]) -> Result<Vec<f64>, MetricError>;
}

/// Converts raw model scores into probability space.
pub trait OutputAdapter: Send + Sync {
    /// Convert one raw score into a probability.
    fn convert_output(&self, raw: f64) -> f64;

    /// The attached external model, if any.
    fn external_model(&self) -> Option<&dyn ExternalModel> {
        None
    }

    /// Whether an external model is attached.
    fn has_external_model(&self) -> bool {
        self.external_model().is_some()
    }

    /// Whether the attached external model should replace raw scores when
    /// computing evaluation metrics.
    fn use_external_model_for_evaluation(&self) -> bool {
        false
    }
}

// =============================================================================
// LogisticOutput
// =============================================================================

/// Sigmoid conversion used by binary logistic objectives.
///
/// `p = 1 / (1 + exp(-sigmoid * x))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticOutput {
    sigmoid: f64,
}

impl Default for LogisticOutput {
    fn default() -> Self {
        Self { sigmoid: 1.0 }
    }
}

impl LogisticOutput {
    /// Create with a custom sigmoid scale.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSigmoid`] unless `sigmoid > 0`.
    pub fn new(sigmoid: f64) -> Result<Self, ConfigError> {
        if sigmoid.is_nan() || sigmoid <= 0.0 {
            return Err(ConfigError::InvalidSigmoid(sigmoid));
        }
        Ok(Self { sigmoid })
    }
}

impl OutputAdapter for LogisticOutput {
    #[inline]
    fn convert_output(&self, raw: f64) -> f64 {
        1.0 / (1.0 + (-self.sigmoid * raw).exp())
    }
}

// =============================================================================
// WithExternalModel
// =============================================================================

/// Attaches an external model to another adapter.
///
/// Conversion is delegated to `inner`. When `use_for_evaluation` is set,
/// metrics score against `model`'s predictions instead.
#[derive(Debug, Clone)]
pub struct WithExternalModel<A, M> {
    inner: A,
    model: M,
    use_for_evaluation: bool,
}

impl<A: OutputAdapter, M: ExternalModel> WithExternalModel<A, M> {
    pub fn new(inner: A, model: M, use_for_evaluation: bool) -> Self {
        Self {
            inner,
            model,
            use_for_evaluation,
        }
    }
}

impl<A: OutputAdapter, M: ExternalModel> OutputAdapter for WithExternalModel<A, M> {
    #[inline]
    fn convert_output(&self, raw: f64) -> f64 {
        self.inner.convert_output(raw)
    }

    fn external_model(&self) -> Option<&dyn ExternalModel> {
        Some(&self.model)
    }

    fn use_external_model_for_evaluation(&self) -> bool {
        self.use_for_evaluation
    }
}

// =============================================================================
// ScoreTransform
// =============================================================================

/// Where the probability for each instance comes from during one `eval`.
pub enum ScoreTransform<'s> {
    /// No adapter: scores are already probabilities.
    Identity,
    /// Convert each raw score through the adapter.
    Convert(&'s dyn OutputAdapter),
    /// External-model predictions, one per instance, used as-is.
    Override(Vec<f64>),
}

impl std::fmt::Debug for ScoreTransform<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Convert(_) => f.write_str("Convert"),
            Self::Override(p) => f.debug_tuple("Override").field(&p.len()).finish(),
        }
    }
}

impl<'s> ScoreTransform<'s> {
    /// Pick the strategy for one evaluation round.
    ///
    /// The external model is queried at most once, with the full score array.
    ///
    /// # Errors
    ///
    /// - [`MetricError::ExternalModelOnTrainingData`] if the adapter asks for
    ///   external-model evaluation and `for_training_data` is set.
    /// - [`MetricError::MissingExternalModel`] if the adapter reports an
    ///   external model but [`OutputAdapter::external_model`] returns `None`.
    /// - [`MetricError::LengthMismatch`] if the external model returns the
    ///   wrong number of predictions.
    /// - Any error raised by the external model itself.
    pub fn resolve(
        output: Option<&'s dyn OutputAdapter>,
        scores: &[f64],
        for_training_data: bool,
        metric: &'static str,
    ) -> Result<Self, MetricError> {
        let Some(adapter) = output else {
            return Ok(Self::Identity);
        };

        if !(adapter.has_external_model() && adapter.use_external_model_for_evaluation()) {
            return Ok(Self::Convert(adapter));
        }

        if for_training_data {
            tracing::error!(
                metric,
                "external model evaluation requested for the training data metric"
            );
            return Err(MetricError::ExternalModelOnTrainingData { metric });
        }

        let Some(model) = adapter.external_model() else {
            return Err(MetricError::MissingExternalModel { metric });
        };
        let predictions = model.predict(scores)?;
        if predictions.len() != scores.len() {
            return Err(MetricError::LengthMismatch {
                what: "external model predictions",
                expected: scores.len(),
                actual: predictions.len(),
            });
        }
        Ok(Self::Override(predictions))
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Convert(_) => "convert",
            Self::Override(_) => "override",
        }
    }
}
