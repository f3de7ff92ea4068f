//! Weighted mean of a pointwise loss.

use std::marker::PhantomData;

use super::{BoundData, EvalOrdering, MetricFn, PointwiseLoss};
use super::loss::{BinaryError, BinaryLogloss};
use crate::data::{Metadata, WeightsView};
use crate::error::MetricError;
use crate::training::config::MetricConfig;
use crate::training::output::{OutputAdapter, ScoreTransform};
use crate::utils::Parallelism;

/// Binary cross-entropy metric.
pub type BinaryLoglossMetric<'a> = BinaryMetric<'a, BinaryLogloss>;

/// Misclassification rate metric.
pub type BinaryErrorMetric<'a> = BinaryMetric<'a, BinaryError>;

/// `sum_i(w_i * L(label_i, p_i)) / sum_i(w_i)` for a pointwise loss `L`.
///
/// Lower is better. The probability `p_i` comes from the resolved
/// [`ScoreTransform`]: the raw score itself when no adapter is given, the
/// adapter's conversion otherwise, or the external model's prediction when
/// the adapter requests it for evaluation.
///
/// When the total weight is zero (including an empty evaluation set) the
/// result is 0.0.
#[derive(Debug, Clone)]
pub struct BinaryMetric<'a, L: PointwiseLoss> {
    names: Vec<String>,
    data: Option<BoundData<'a>>,
    for_training_data: bool,
    parallelism: Parallelism,
    min_rows_per_thread: usize,
    _loss: PhantomData<L>,
}

impl<'a, L: PointwiseLoss> BinaryMetric<'a, L> {
    pub fn new(config: &MetricConfig) -> Self {
        Self {
            names: vec![L::NAME.to_string()],
            data: None,
            for_training_data: false,
            parallelism: config.parallelism(),
            min_rows_per_thread: config.min_rows_per_thread,
            _loss: PhantomData,
        }
    }

    /// Whether this metric evaluates the training data.
    pub fn is_training_data(&self) -> bool {
        self.for_training_data
    }

    /// Cached total weight, `None` before `init`.
    pub fn sum_weights(&self) -> Option<f64> {
        self.data.map(|d| d.sum_weights)
    }

    fn sum_loss<P>(&self, data: &BoundData<'a>, prob: P) -> f64
    where
        P: Fn(usize) -> f64 + Sync + Send,
    {
        let parallelism = self
            .parallelism
            .correct_for_workload(data.num_data, self.min_rows_per_thread);
        let labels = data.labels;

        match data.weights {
            WeightsView::None => parallelism
                .maybe_par_sum(data.num_data, |i| L::loss_on_point(labels[i], prob(i))),
            WeightsView::Some(weights) => parallelism.maybe_par_sum(data.num_data, |i| {
                L::loss_on_point(labels[i], prob(i)) * weights[i] as f64
            }),
        }
    }
}

impl<'a, L: PointwiseLoss> MetricFn<'a> for BinaryMetric<'a, L> {
    fn init(&mut self, metadata: Metadata<'a>, num_data: usize) -> Result<(), MetricError> {
        BoundData::bind(&mut self.data, metadata, num_data, L::NAME)
    }

    fn names(&self) -> &[String] {
        &self.names
    }

    fn ordering(&self) -> EvalOrdering {
        EvalOrdering::LowerIsBetter
    }

    fn eval(
        &self,
        scores: &[f64],
        output: Option<&dyn OutputAdapter>,
    ) -> Result<Vec<f64>, MetricError> {
        let data = BoundData::get(&self.data, L::NAME)?;
        data.check_scores(scores)?;

        let transform = ScoreTransform::resolve(output, scores, self.for_training_data, L::NAME)?;
        tracing::trace!(
            metric = L::NAME,
            transform = transform.kind(),
            num_data = data.num_data,
            "evaluating"
        );

        let sum_loss = match &transform {
            ScoreTransform::Identity => self.sum_loss(&data, |i| scores[i]),
            ScoreTransform::Convert(adapter) => {
                self.sum_loss(&data, |i| adapter.convert_output(scores[i]))
            }
            ScoreTransform::Override(predictions) => self.sum_loss(&data, |i| predictions[i]),
        };

        let loss = if data.sum_weights > 0.0 {
            sum_loss / data.sum_weights
        } else {
            0.0
        };
        Ok(vec![loss])
    }

    fn set_training_data(&mut self, is_training_data: bool) {
        self.for_training_data = is_training_data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedExternalModel, DEFAULT_TOLERANCE};
    use crate::training::output::{LogisticOutput, WithExternalModel};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn sequential() -> MetricConfig {
        MetricConfig::builder().n_threads(1).build().unwrap()
    }

    #[test]
    fn error_rate_one_third() {
        let labels = array![1.0f32, 0.0, 1.0];
        let mut metric = BinaryErrorMetric::new(&sequential());
        metric.init(Metadata::new(labels.view()), 3).unwrap();

        let err = metric.eval(&[0.9, 0.2, 0.4], None).unwrap();
        assert_eq!(err.len(), 1);
        assert_abs_diff_eq!(err[0], 1.0 / 3.0, epsilon = DEFAULT_TOLERANCE);
    }

    #[test]
    fn logloss_random_guess() {
        let labels = array![1.0f32, 0.0];
        let mut metric = BinaryLoglossMetric::new(&sequential());
        metric.init(Metadata::new(labels.view()), 2).unwrap();

        let ll = metric.eval(&[0.5, 0.5], None).unwrap()[0];
        assert_abs_diff_eq!(ll, std::f64::consts::LN_2, epsilon = DEFAULT_TOLERANCE);
    }

    #[test]
    fn logloss_weighted() {
        let labels = array![1.0f32, 1.0];
        let weights = array![3.0f32, 1.0];
        let mut metric = BinaryLoglossMetric::new(&sequential());
        metric
            .init(
                Metadata::with_weights(labels.view(), WeightsView::from_array(weights.view())),
                2,
            )
            .unwrap();
        assert_eq!(metric.sum_weights(), Some(4.0));

        let ll = metric.eval(&[0.9, 0.1], None).unwrap()[0];
        let expected = (3.0 * -(0.9f64).ln() + -(0.1f64).ln()) / 4.0;
        assert_abs_diff_eq!(ll, expected, epsilon = DEFAULT_TOLERANCE);
    }

    #[test]
    fn adapter_converts_raw_scores() {
        let labels = array![1.0f32, 0.0];
        let mut metric = BinaryErrorMetric::new(&sequential());
        metric.init(Metadata::new(labels.view()), 2).unwrap();

        // Raw margins: 2.0 -> p > 0.5, -2.0 -> p < 0.5.
        let out = LogisticOutput::default();
        assert_eq!(metric.eval(&[2.0, -2.0], Some(&out)).unwrap(), vec![0.0]);
        // Without the adapter both margins are read as probabilities.
        assert_eq!(metric.eval(&[2.0, -2.0], None).unwrap(), vec![0.0]);
        assert_eq!(metric.eval(&[-2.0, 2.0], Some(&out)).unwrap(), vec![1.0]);
    }

    #[test]
    fn external_model_overrides_scores() {
        let labels = array![1.0f32, 0.0];
        let mut metric = BinaryErrorMetric::new(&sequential());
        metric.init(Metadata::new(labels.view()), 2).unwrap();

        // The raw scores are perfect, the external model gets both wrong.
        let model = FixedExternalModel {
            predictions: vec![0.1, 0.9],
        };
        let out = WithExternalModel::new(LogisticOutput::default(), model, true);
        assert_eq!(metric.eval(&[5.0, -5.0], Some(&out)).unwrap(), vec![1.0]);
    }

    #[test]
    fn external_model_on_training_data_is_rejected() {
        let labels = array![1.0f32, 0.0];
        let mut metric = BinaryLoglossMetric::new(&sequential());
        metric.set_training_data(true);
        assert!(metric.is_training_data());
        metric.init(Metadata::new(labels.view()), 2).unwrap();

        let model = FixedExternalModel {
            predictions: vec![0.9, 0.1],
        };
        let out = WithExternalModel::new(LogisticOutput::default(), model, true);
        let err = metric.eval(&[1.0, -1.0], Some(&out)).unwrap_err();
        assert_eq!(
            err,
            MetricError::ExternalModelOnTrainingData {
                metric: "binary_logloss"
            }
        );
    }

    /// Reports a model for evaluation through its flags alone.
    struct FlagOnlyAdapter;

    impl OutputAdapter for FlagOnlyAdapter {
        fn convert_output(&self, raw: f64) -> f64 {
            raw
        }

        fn has_external_model(&self) -> bool {
            true
        }

        fn use_external_model_for_evaluation(&self) -> bool {
            true
        }
    }

    #[test]
    fn flagged_external_model_on_training_data_is_rejected() {
        let labels = array![1.0f32, 0.0];
        let mut metric = BinaryErrorMetric::new(&sequential());
        metric.set_training_data(true);
        metric.init(Metadata::new(labels.view()), 2).unwrap();

        assert_eq!(
            metric.eval(&[0.9, 0.1], Some(&FlagOnlyAdapter)),
            Err(MetricError::ExternalModelOnTrainingData {
                metric: "binary_error"
            })
        );
    }

    #[test]
    fn eval_before_init_fails() {
        let metric = BinaryLoglossMetric::new(&MetricConfig::default());
        assert_eq!(
            metric.eval(&[0.5], None),
            Err(MetricError::NotInitialized {
                metric: "binary_logloss"
            })
        );
        assert_eq!(metric.sum_weights(), None);
    }

    #[test]
    fn double_init_fails() {
        let labels = array![1.0f32];
        let mut metric = BinaryErrorMetric::new(&MetricConfig::default());
        metric.init(Metadata::new(labels.view()), 1).unwrap();
        assert!(matches!(
            metric.init(Metadata::new(labels.view()), 1),
            Err(MetricError::AlreadyInitialized { .. })
        ));
    }

    #[test]
    fn score_length_mismatch_fails() {
        let labels = array![1.0f32, 0.0];
        let mut metric = BinaryErrorMetric::new(&MetricConfig::default());
        metric.init(Metadata::new(labels.view()), 2).unwrap();
        assert!(matches!(
            metric.eval(&[0.5], None),
            Err(MetricError::LengthMismatch { what: "scores", .. })
        ));
    }

    #[test]
    fn empty_set_is_zero() {
        let labels = ndarray::Array1::<f32>::zeros(0);
        let mut metric = BinaryLoglossMetric::new(&MetricConfig::default());
        metric.init(Metadata::new(labels.view()), 0).unwrap();
        assert_eq!(metric.eval(&[], None).unwrap(), vec![0.0]);
    }

    #[test]
    fn metric_properties() {
        let ll = BinaryLoglossMetric::new(&MetricConfig::default());
        let err = BinaryErrorMetric::new(&MetricConfig::default());
        assert_eq!(ll.names(), ["binary_logloss".to_string()]);
        assert_eq!(err.names(), ["binary_error".to_string()]);
        assert_eq!(ll.ordering(), EvalOrdering::LowerIsBetter);
        assert_eq!(err.ordering(), EvalOrdering::LowerIsBetter);
    }
}
