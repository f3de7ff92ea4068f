//! Error types.

/// Errors raised by metric initialization and evaluation.
///
/// None of these are transient: each is either a caller contract violation or
/// a configuration conflict, so nothing in this crate retries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    /// External-model predictions were requested while evaluating the
    /// training data itself.
    #[error(
        "{metric}: cannot use the external model for evaluation when calculating the training data loss"
    )]
    ExternalModelOnTrainingData { metric: &'static str },

    /// The adapter reports an external model for evaluation but does not
    /// expose one.
    #[error("{metric}: output adapter reports an external model but provides none")]
    MissingExternalModel { metric: &'static str },

    /// `eval` was called before `init`.
    #[error("{metric}: eval called before init")]
    NotInitialized { metric: &'static str },

    /// `init` was called twice on the same metric.
    #[error("{metric}: init called more than once")]
    AlreadyInitialized { metric: &'static str },

    /// An input array does not cover exactly `num_data` samples.
    #[error("{what} length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The attached external model failed to produce predictions.
    #[error("external model prediction failed: {0}")]
    ExternalModel(String),
}

/// Invalid metric or output configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// min_rows_per_thread must be >= 1.
    #[error("min_rows_per_thread must be >= 1, got {0}")]
    InvalidMinRowsPerThread(usize),

    /// sigmoid must be > 0.
    #[error("sigmoid must be > 0, got {0}")]
    InvalidSigmoid(f64),
}
