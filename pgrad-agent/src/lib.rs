#![warn(missing_docs)]
//! Policy-gradient agents built on [`ndarray`].
//!
//! An agent is the composition of two small capabilities:
//!
//! * a [`PolicyModel`], mapping `(params, state)` to a distribution over
//!   discrete actions together with its score function, and
//! * an [`UpdateRule`], turning completed episodes into parameter updates.
//!
//! [`PgAgent`] wires both to a seeded random source and implements
//! [`pgrad_core::Agent`].
//!
//! | model            | parameters          |
//! |------------------|---------------------|
//! | [`UniformPolicy`] | `()`               |
//! | [`LinearSoftmax`] | `Array2<f64>`      |
//! | [`Mlp`]           | [`MlpParams`]      |
//!
//! | update rule            | behaviour                                  |
//! |------------------------|--------------------------------------------|
//! | [`NoUpdate`]           | parameters never change                    |
//! | [`Reinforce`]          | one gradient-ascent step per episode       |
//! | [`BatchedReinforce`]   | averaged gradient of several episodes       |
mod agent;
mod buffer;
mod gradient;
mod linear;
mod mlp;
mod model;
mod uniform;
mod update;
pub mod util;

pub use agent::{PgAgent, PgAgentConfig};
pub use buffer::EpisodeBuffer;
pub use gradient::Gradient;
pub use linear::{LinearSoftmax, LinearSoftmaxConfig};
pub use mlp::{Activation, Mlp, MlpConfig, MlpParams};
pub use model::PolicyModel;
pub use uniform::{UniformPolicy, UniformPolicyConfig};
pub use update::{
    Baseline, BatchedReinforce, BatchedReinforceConfig, NoUpdate, Reinforce, ReinforceConfig,
    UpdateRule,
};
