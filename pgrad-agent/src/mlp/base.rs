use super::{Activation, MlpConfig};
use crate::{
    util::{check_action, check_distribution, check_state, log_softmax},
    Gradient, PolicyModel,
};
use anyhow::Result;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use pgrad_core::{error::PgError, Configurable};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
/// Parameters of [`Mlp`].
pub struct MlpParams {
    /// Weights of layers, `ws[l]` has shape `(out_dim, in_dim)`.
    pub ws: Vec<Array2<f64>>,

    /// Biases of layers.
    pub bs: Vec<Array1<f64>>,
}

impl Gradient for MlpParams {
    fn zeros_like(&self) -> Self {
        Self {
            ws: self.ws.iter().map(|w| Array2::zeros(w.raw_dim())).collect(),
            bs: self.bs.iter().map(|b| Array1::zeros(b.raw_dim())).collect(),
        }
    }

    fn axpy(&mut self, alpha: f64, other: &Self) {
        for (w, o) in self.ws.iter_mut().zip(other.ws.iter()) {
            w.scaled_add(alpha, o);
        }
        for (b, o) in self.bs.iter_mut().zip(other.bs.iter()) {
            b.scaled_add(alpha, o);
        }
    }

    fn is_finite(&self) -> bool {
        self.ws.iter().all(|w| w.iter().all(|x| x.is_finite()))
            && self.bs.iter().all(|b| b.iter().all(|x| x.is_finite()))
    }

    fn norm(&self) -> f64 {
        let ws = self.ws.iter().flat_map(|w| w.iter());
        let bs = self.bs.iter().flat_map(|b| b.iter());
        ws.chain(bs).map(|x| x * x).sum::<f64>().sqrt()
    }
}

/// Softmax policy whose logits are the output of a multilayer perceptron.
///
/// Hidden layers are initialized with the Glorot uniform scheme from the
/// agent's random source, the output layer with zeros, so a freshly reset
/// policy is uniform like [`LinearSoftmax`](crate::LinearSoftmax).
/// The score is computed by backpropagation.
#[derive(Debug, Clone)]
pub struct Mlp {
    state_dim: usize,
    units: Vec<usize>,
    n_actions: usize,
    activation: Activation,
}

impl Configurable for Mlp {
    type Config = MlpConfig;

    fn build(config: Self::Config) -> Result<Self> {
        if config.n_actions == 0 || config.units.iter().any(|u| *u == 0) {
            return Err(PgError::InvalidConfig(format!(
                "layer sizes must be positive, got units {:?} and n_actions {}",
                config.units, config.n_actions
            ))
            .into());
        }
        Ok(Self {
            state_dim: config.state_dim,
            units: config.units,
            n_actions: config.n_actions,
            activation: config.activation,
        })
    }
}

impl Mlp {
    /// `(out_dim, in_dim)` of every layer.
    fn layer_dims(&self) -> Vec<(usize, usize)> {
        let mut dims = Vec::with_capacity(self.units.len() + 1);
        let mut in_dim = self.state_dim;
        for &u in self.units.iter().chain(std::iter::once(&self.n_actions)) {
            dims.push((u, in_dim));
            in_dim = u;
        }
        dims
    }

    fn check_params(&self, params: &MlpParams) -> Result<(), PgError> {
        let dims = self.layer_dims();
        if params.ws.len() != dims.len() || params.bs.len() != dims.len() {
            return Err(PgError::dim(
                "number of layers",
                &[dims.len(), dims.len()],
                &[params.ws.len(), params.bs.len()],
            ));
        }
        for (l, &(o, i)) in dims.iter().enumerate() {
            if params.ws[l].shape() != &[o, i][..] {
                return Err(PgError::dim(format!("weight {}", l), &[o, i], params.ws[l].shape()));
            }
            if params.bs[l].len() != o {
                return Err(PgError::dim(format!("bias {}", l), &[o], &[params.bs[l].len()]));
            }
        }
        Ok(())
    }

    fn activate(&self, z: Array1<f64>) -> Array1<f64> {
        match self.activation {
            Activation::Tanh => z.mapv(f64::tanh),
            Activation::Relu => z.mapv(|x| x.max(0.0)),
        }
    }

    /// Derivative of the activation expressed with its output `h`.
    fn derivative(&self, h: &Array1<f64>) -> Array1<f64> {
        match self.activation {
            Activation::Tanh => h.mapv(|h| 1.0 - h * h),
            Activation::Relu => h.mapv(|h| if h > 0.0 { 1.0 } else { 0.0 }),
        }
    }

    /// Returns the input of every layer and the output logits.
    fn forward(
        &self,
        params: &MlpParams,
        state: ArrayView1<f64>,
    ) -> Result<(Vec<Array1<f64>>, Array1<f64>), PgError> {
        check_state(state, self.state_dim)?;
        self.check_params(params)?;

        let n_layers = params.ws.len();
        let mut inputs = vec![state.to_owned()];
        for l in 0..n_layers - 1 {
            let z = params.ws[l].dot(&inputs[l]) + &params.bs[l];
            inputs.push(self.activate(z));
        }
        let logits = params.ws[n_layers - 1].dot(&inputs[n_layers - 1]) + &params.bs[n_layers - 1];

        Ok((inputs, logits))
    }
}

impl PolicyModel for Mlp {
    type Params = MlpParams;

    fn state_dim(&self) -> usize {
        self.state_dim
    }

    fn n_actions(&self) -> usize {
        self.n_actions
    }

    fn init_params<R: Rng + ?Sized>(&self, rng: &mut R) -> MlpParams {
        let dims = self.layer_dims();
        let n_layers = dims.len();
        let ws = dims
            .iter()
            .enumerate()
            .map(|(l, &(o, i))| match l == n_layers - 1 {
                true => Array2::zeros((o, i)),
                false => {
                    let limit = (6.0 / (o + i) as f64).sqrt();
                    Array2::from_shape_fn((o, i), |_| rng.gen_range(-limit..limit))
                }
            })
            .collect();
        let bs = dims.iter().map(|&(o, _)| Array1::zeros(o)).collect();
        MlpParams { ws, bs }
    }

    fn log_policy(
        &self,
        params: &MlpParams,
        state: ArrayView1<f64>,
    ) -> Result<Array1<f64>, PgError> {
        let (_, logits) = self.forward(params, state)?;
        Ok(log_softmax(logits.view()))
    }

    fn score(
        &self,
        params: &MlpParams,
        state: ArrayView1<f64>,
        action: usize,
    ) -> Result<MlpParams, PgError> {
        check_action(action, self.n_actions)?;
        let (inputs, logits) = self.forward(params, state)?;
        let probs = log_softmax(logits.view()).mapv(f64::exp);
        check_distribution(probs.view())?;

        // Gradient of log π[action] with respect to the logits
        let mut delta = -probs;
        delta[action] += 1.0;

        let n_layers = params.ws.len();
        let mut ws = Vec::with_capacity(n_layers);
        let mut bs = Vec::with_capacity(n_layers);
        for l in (0..n_layers).rev() {
            let outer = delta
                .view()
                .insert_axis(Axis(1))
                .dot(&inputs[l].view().insert_axis(Axis(0)));
            ws.push(outer);
            bs.push(delta.clone());
            if l > 0 {
                delta = params.ws[l].t().dot(&delta) * self.derivative(&inputs[l]);
            }
        }
        ws.reverse();
        bs.reverse();

        Ok(MlpParams { ws, bs })
    }
}
