//! Softmax policy linear in the state.
use crate::{
    util::{check_action, check_state, log_softmax},
    PolicyModel,
};
use anyhow::Result;
use ndarray::{Array1, Array2, ArrayView1};
use pgrad_core::{error::PgError, Configurable};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration of [`LinearSoftmax`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct LinearSoftmaxConfig {
    /// Length of state vectors.
    pub state_dim: usize,

    /// Number of actions.
    pub n_actions: usize,
}

impl LinearSoftmaxConfig {
    /// Creates a configuration.
    pub fn new(state_dim: usize, n_actions: usize) -> Self {
        Self {
            state_dim,
            n_actions,
        }
    }
}

/// Softmax policy with logits `params · state`.
///
/// Parameters are a matrix of shape `(n_actions, state_dim)`:
///
/// ```text
/// log π(a | s) = θ_a · s - logsumexp_a' (θ_a' · s)
/// ∇_θ log π(a | s)[a'] = (1[a' == a] - π(a' | s)) s
/// ```
///
/// Zero parameters give the uniform distribution, which is also the
/// baseline returned by [`PolicyModel::init_params`].
#[derive(Debug, Clone)]
pub struct LinearSoftmax {
    state_dim: usize,
    n_actions: usize,
}

impl LinearSoftmax {
    fn check_params(&self, params: &Array2<f64>) -> Result<(), PgError> {
        let expected = [self.n_actions, self.state_dim];
        match params.shape() == &expected[..] {
            true => Ok(()),
            false => Err(PgError::dim("parameters", &expected, params.shape())),
        }
    }
}

impl Configurable for LinearSoftmax {
    type Config = LinearSoftmaxConfig;

    fn build(config: Self::Config) -> Result<Self> {
        if config.n_actions == 0 {
            return Err(PgError::InvalidConfig("n_actions must be positive".to_string()).into());
        }
        Ok(Self {
            state_dim: config.state_dim,
            n_actions: config.n_actions,
        })
    }
}

impl PolicyModel for LinearSoftmax {
    type Params = Array2<f64>;

    fn state_dim(&self) -> usize {
        self.state_dim
    }

    fn n_actions(&self) -> usize {
        self.n_actions
    }

    fn init_params<R: Rng + ?Sized>(&self, _rng: &mut R) -> Self::Params {
        Array2::zeros((self.n_actions, self.state_dim))
    }

    fn log_policy(
        &self,
        params: &Array2<f64>,
        state: ArrayView1<f64>,
    ) -> Result<Array1<f64>, PgError> {
        check_state(state, self.state_dim)?;
        self.check_params(params)?;
        Ok(log_softmax(params.dot(&state).view()))
    }

    fn score(
        &self,
        params: &Array2<f64>,
        state: ArrayView1<f64>,
        action: usize,
    ) -> Result<Array2<f64>, PgError> {
        check_action(action, self.n_actions)?;
        let probs = self.policy(params, state)?;
        Ok(Array2::from_shape_fn(
            (self.n_actions, self.state_dim),
            |(a, j)| {
                let indicator = if a == action { 1.0 } else { 0.0 };
                (indicator - probs[a]) * state[j]
            },
        ))
    }
}
