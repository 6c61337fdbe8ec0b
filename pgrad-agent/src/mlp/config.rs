use serde::{Deserialize, Serialize};

/// Activation function of hidden layers.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum Activation {
    /// Hyperbolic tangent.
    #[default]
    Tanh,

    /// Rectified linear unit.
    Relu,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`Mlp`](super::Mlp).
pub struct MlpConfig {
    pub(super) state_dim: usize,
    pub(super) units: Vec<usize>,
    pub(super) n_actions: usize,
    #[serde(default)]
    pub(super) activation: Activation,
}

impl MlpConfig {
    /// Creates configuration of MLP.
    ///
    /// * `units` - Numbers of units of the hidden layers. With no hidden
    ///   layer the model is a linear softmax policy with biases.
    pub fn new(state_dim: usize, units: Vec<usize>, n_actions: usize) -> Self {
        Self {
            state_dim,
            units,
            n_actions,
            activation: Activation::default(),
        }
    }

    /// Sets the activation function of hidden layers.
    pub fn activation(mut self, v: Activation) -> Self {
        self.activation = v;
        self
    }
}
