//! Multilayer perceptron policy.
mod base;
mod config;
pub use base::{Mlp, MlpParams};
pub use config::{Activation, MlpConfig};
