//! Numerical helpers shared by the policy models.
use ndarray::{Array1, ArrayView1};
use pgrad_core::error::PgError;

/// Tolerance of [`check_distribution`] on the total probability mass.
pub const PROB_SUM_TOL: f64 = 1e-6;

/// Log-softmax of `logits`.
///
/// The maximum logit is subtracted before exponentiation, so large logits do
/// not overflow.
pub fn log_softmax(logits: ArrayView1<f64>) -> Array1<f64> {
    let max = logits.fold(f64::NEG_INFINITY, |m, &x| m.max(x));
    let shifted = logits.mapv(|x| x - max);
    let lse = shifted.mapv(f64::exp).sum().ln();
    shifted.mapv(|x| x - lse)
}

/// Checks that `probs` is a probability vector: finite, non-negative entries
/// summing to one within [`PROB_SUM_TOL`].
pub fn check_distribution(probs: ArrayView1<f64>) -> Result<(), PgError> {
    if probs.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(PgError::NonFinite(format!("action probabilities {}", probs)));
    }
    let sum = probs.sum();
    if (sum - 1.0).abs() > PROB_SUM_TOL {
        return Err(PgError::NonFinite(format!(
            "action probabilities sum to {}",
            sum
        )));
    }
    Ok(())
}

/// Fails unless `state` has `state_dim` elements.
pub fn check_state(state: ArrayView1<f64>, state_dim: usize) -> Result<(), PgError> {
    match state.len() == state_dim {
        true => Ok(()),
        false => Err(PgError::dim("state", &[state_dim], &[state.len()])),
    }
}

/// Fails unless `action < n_actions`.
pub fn check_action(action: usize, n_actions: usize) -> Result<(), PgError> {
    match action < n_actions {
        true => Ok(()),
        false => Err(PgError::InvalidAction { action, n_actions }),
    }
}

/// Index of the largest element, the first one on ties.
pub fn argmax(xs: ArrayView1<f64>) -> usize {
    let mut best = 0;
    for (i, x) in xs.iter().enumerate() {
        if *x > xs[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_log_softmax_is_stable() {
        let lp = log_softmax(array![1000.0, 1000.0, 0.0].view());
        assert!(lp.iter().all(|x| x.is_finite()));
        assert!((lp[0] - 0.5f64.ln()).abs() < 1e-12);
        assert!((lp[1] - 0.5f64.ln()).abs() < 1e-12);

        let p = lp.mapv(f64::exp);
        check_distribution(p.view()).unwrap();
    }

    #[test]
    fn test_check_distribution_rejects_nan() {
        let r = check_distribution(array![0.5, f64::NAN].view());
        assert!(matches!(r, Err(PgError::NonFinite(_))));
        let r = check_distribution(array![0.5, 0.6].view());
        assert!(matches!(r, Err(PgError::NonFinite(_))));
    }

    #[test]
    fn test_argmax_first_on_ties() {
        assert_eq!(argmax(array![0.2, 0.4, 0.4].view()), 1);
        assert_eq!(argmax(array![0.5, 0.5].view()), 0);
    }
}
