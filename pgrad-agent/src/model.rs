//! Policy models.
use crate::{util::check_distribution, Gradient};
use ndarray::{Array1, ArrayView1};
use pgrad_core::error::PgError;
use rand::Rng;

/// A parametric stochastic policy over discrete actions.
///
/// Every method takes the parameters explicitly and never reads mutable
/// agent state, so distributions and gradients can be evaluated against any
/// parameter snapshot.
pub trait PolicyModel {
    /// Parameters of the model, also the type of the score.
    type Params: Gradient;

    /// Length of state vectors.
    fn state_dim(&self) -> usize;

    /// Number of actions.
    fn n_actions(&self) -> usize;

    /// Baseline parameters used when an agent is reset.
    fn init_params<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Params;

    /// Log-probabilities of all actions, a vector of length `n_actions`.
    fn log_policy(
        &self,
        params: &Self::Params,
        state: ArrayView1<f64>,
    ) -> Result<Array1<f64>, PgError>;

    /// Probabilities of all actions.
    ///
    /// Fails with [`PgError::NonFinite`] if the result is not a valid
    /// probability vector.
    fn policy(
        &self,
        params: &Self::Params,
        state: ArrayView1<f64>,
    ) -> Result<Array1<f64>, PgError> {
        let probs = self.log_policy(params, state)?.mapv(f64::exp);
        check_distribution(probs.view())?;
        Ok(probs)
    }

    /// Gradient of `log_policy(params, state)[action]` with respect to `params`.
    fn score(
        &self,
        params: &Self::Params,
        state: ArrayView1<f64>,
        action: usize,
    ) -> Result<Self::Params, PgError>;
}
