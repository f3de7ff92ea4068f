//! Area Under the ROC Curve.

use super::{is_positive, BoundData, EvalOrdering, MetricFn};
use crate::data::{Metadata, WeightsView};
use crate::error::MetricError;
use crate::training::config::MetricConfig;
use crate::training::output::OutputAdapter;
use crate::utils::Parallelism;

const NAME: &str = "auc";

/// Weighted Area Under the ROC Curve for binary classification.
///
/// Higher is better. Only the ranking of scores matters, so the output
/// adapter is ignored.
///
/// Instances are sorted by descending score and walked in groups of equal
/// score. Each negative is credited with the positive weight ranked strictly
/// above it plus half the positive weight tied with it:
///
/// ```text
/// accum += cur_neg * (sum_pos + cur_pos / 2)
/// auc    = accum / (sum_pos * sum_neg)
/// ```
///
/// When one class has no weight the statistic is undefined; it is reported
/// as 1.0.
#[derive(Debug, Clone)]
pub struct AucMetric<'a> {
    names: Vec<String>,
    data: Option<BoundData<'a>>,
    parallelism: Parallelism,
    min_rows_per_thread: usize,
}

impl<'a> AucMetric<'a> {
    pub fn new(config: &MetricConfig) -> Self {
        Self {
            names: vec![NAME.to_string()],
            data: None,
            parallelism: config.parallelism(),
            min_rows_per_thread: config.min_rows_per_thread,
        }
    }

    /// Cached total weight, `None` before `init`.
    pub fn sum_weights(&self) -> Option<f64> {
        self.data.map(|d| d.sum_weights)
    }
}

impl<'a> MetricFn<'a> for AucMetric<'a> {
    fn init(&mut self, metadata: Metadata<'a>, num_data: usize) -> Result<(), MetricError> {
        BoundData::bind(&mut self.data, metadata, num_data, NAME)
    }

    fn names(&self) -> &[String] {
        &self.names
    }

    fn ordering(&self) -> EvalOrdering {
        EvalOrdering::HigherIsBetter
    }

    fn eval(
        &self,
        scores: &[f64],
        _output: Option<&dyn OutputAdapter>,
    ) -> Result<Vec<f64>, MetricError> {
        let data = BoundData::get(&self.data, NAME)?;
        data.check_scores(scores)?;

        let mut sorted: Vec<usize> = (0..data.num_data).collect();
        self.parallelism
            .correct_for_workload(data.num_data, self.min_rows_per_thread)
            .maybe_par_sort_unstable_by(&mut sorted, |&a, &b| scores[b].total_cmp(&scores[a]));

        let labels = data.labels;
        let tally = match data.weights {
            WeightsView::None => accumulate(&sorted, scores, |i| labels[i], |_| 1.0),
            WeightsView::Some(weights) => {
                accumulate(&sorted, scores, |i| labels[i], |i| weights[i] as f64)
            }
        };

        let auc = if tally.sum_pos > 0.0 && tally.sum_neg > 0.0 {
            tally.accum / (tally.sum_pos * tally.sum_neg)
        } else {
            tracing::debug!(
                sum_pos = tally.sum_pos,
                sum_neg = tally.sum_neg,
                "auc: single class present, reporting 1.0"
            );
            1.0
        };
        Ok(vec![auc])
    }
}

/// Totals from one walk over the sorted instances.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct RankTally {
    accum: f64,
    sum_pos: f64,
    sum_neg: f64,
}

/// Tie-grouped rank accumulation over `sorted` (descending by score).
fn accumulate<L, W>(sorted: &[usize], scores: &[f64], label: L, weight: W) -> RankTally
where
    L: Fn(usize) -> f32,
    W: Fn(usize) -> f64,
{
    let mut tally = RankTally::default();
    let Some(&first) = sorted.first() else {
        return tally;
    };

    // Weighted positives and negatives in the current tie group.
    let mut cur_pos = 0.0f64;
    let mut cur_neg = 0.0f64;
    let mut threshold = scores[first];

    for &i in sorted {
        let score = scores[i];
        if score != threshold {
            threshold = score;
            tally.flush(cur_pos, cur_neg);
            cur_pos = 0.0;
            cur_neg = 0.0;
        }
        let w = weight(i);
        if is_positive(label(i)) {
            cur_pos += w;
        } else {
            cur_neg += w;
        }
    }
    tally.flush(cur_pos, cur_neg);
    tally
}

impl RankTally {
    #[inline]
    fn flush(&mut self, cur_pos: f64, cur_neg: f64) {
        self.accum += cur_neg * (cur_pos * 0.5 + self.sum_pos);
        self.sum_pos += cur_pos;
        self.sum_neg += cur_neg;
    }
}
