use ndarray::Array1;
use rand::prelude::*;

/// Synthetic binary classification evaluation set.
///
/// Returns `(labels, weights, scores)`. About 60% of labels are positive,
/// weights are uniform in `[0.5, 1.5)`, and scores are raw margins correlated
/// with the label and quantized to a 0.05 grid so that ties occur.
pub fn synthetic_binary(rows: usize, seed: u64) -> (Array1<f32>, Array1<f32>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut labels = Vec::with_capacity(rows);
    let mut weights = Vec::with_capacity(rows);
    let mut scores = Vec::with_capacity(rows);
    for _ in 0..rows {
        let u = rng.r#gen::<f64>();
        labels.push(if u > 0.4 { 1.0f32 } else { 0.0 });
        weights.push(0.5 + rng.r#gen::<f32>());
        let margin = (u - 0.4) * 4.0 + (rng.r#gen::<f64>() - 0.5) * 3.0;
        scores.push((margin * 20.0).round() / 20.0);
    }

    (Array1::from(labels), Array1::from(weights), scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_is_deterministic() {
        let (la, wa, sa) = synthetic_binary(100, 7);
        let (lb, wb, sb) = synthetic_binary(100, 7);
        assert_eq!(la, lb);
        assert_eq!(wa, wb);
        assert_eq!(sa, sb);
    }

    #[test]
    fn synthetic_has_both_classes() {
        let (labels, weights, scores) = synthetic_binary(1000, 42);
        assert_eq!(scores.len(), 1000);
        assert!(labels.iter().any(|&l| l > 0.0));
        assert!(labels.iter().any(|&l| l <= 0.0));
        assert!(weights.iter().all(|&w| (0.5..1.5).contains(&w)));
    }
}
