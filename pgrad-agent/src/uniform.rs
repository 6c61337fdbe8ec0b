//! Uniform random policy.
use crate::{
    util::{check_action, check_state},
    PolicyModel,
};
use anyhow::Result;
use ndarray::{Array1, ArrayView1};
use pgrad_core::{error::PgError, Configurable};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration of [`UniformPolicy`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct UniformPolicyConfig {
    /// Length of state vectors.
    pub state_dim: usize,

    /// Number of actions.
    pub n_actions: usize,
}

impl UniformPolicyConfig {
    /// Constructs [`UniformPolicyConfig`].
    pub fn new(state_dim: usize, n_actions: usize) -> Self {
        Self {
            state_dim,
            n_actions,
        }
    }
}

/// Picks every action with probability `1 / n_actions`, whatever the state.
///
/// It has no parameters; its score is the unit value `()`.
#[derive(Debug, Clone)]
pub struct UniformPolicy {
    state_dim: usize,
    n_actions: usize,
}

impl Configurable for UniformPolicy {
    type Config = UniformPolicyConfig;

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

impl PolicyModel for UniformPolicy {
    type Params = ();

    fn state_dim(&self) -> usize {
        self.state_dim
    }

    fn n_actions(&self) -> usize {
        self.n_actions
    }

    fn init_params<R: Rng + ?Sized>(&self, _rng: &mut R) -> Self::Params {}

    fn log_policy(&self, _params: &(), state: ArrayView1<f64>) -> Result<Array1<f64>, PgError> {
        check_state(state, self.state_dim)?;
        Ok(Array1::from_elem(
            self.n_actions,
            -(self.n_actions as f64).ln(),
        ))
    }

    fn score(&self, _params: &(), state: ArrayView1<f64>, action: usize) -> Result<(), PgError> {
        check_state(state, self.state_dim)?;
        check_action(action, self.n_actions)
    }
}
