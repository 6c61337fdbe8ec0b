//! Online policy-gradient reinforcement learning in Rust.
//!
//! pgrad consists of the following crates:
//!
//! * [pgrad-core](pgrad_core) provides the traits shared by environments and
//!   agents, records and recorders, and the interaction loop
//!   ([`Trainer`](pgrad_core::Trainer)) that runs an agent for a fixed number
//!   of transitions and returns the discounted return of every episode.
//! * [pgrad-agent](pgrad_agent) implements policy models (uniform, linear
//!   softmax, multilayer perceptron) on [ndarray](https://crates.io/crates/ndarray),
//!   update rules (REINFORCE and its batched variant with a baseline) and
//!   [`PgAgent`](pgrad_agent::PgAgent), which composes the two.
//! * [pgrad-env](pgrad_env) has native environments, the classic cart-pole
//!   task and a synthetic reward chain.
//!
//! This crate re-exports them and hosts runnable examples.
//!
//! # Example
//!
//! ```no_run
//! use pgrad::{
//!     agent::{LinearSoftmax, LinearSoftmaxConfig, PgAgent, PgAgentConfig, Reinforce, ReinforceConfig},
//!     env::{RewardChain, RewardChainConfig},
//!     record::NullRecorder,
//!     Configurable, Env, Trainer, TrainerConfig,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut env = RewardChain::build(&RewardChainConfig::default(), 0)?;
//! let mut agent = PgAgent::<RewardChain, LinearSoftmax, Reinforce>::build(PgAgentConfig {
//!     model: LinearSoftmaxConfig::new(2, 2),
//!     update: ReinforceConfig::default().learning_rate(0.1),
//!     seed: 0,
//! })?;
//! let mut trainer = Trainer::build(TrainerConfig::default().n_steps(1000))?;
//! let performances = trainer.train(&mut env, &mut agent, &mut NullRecorder::new())?;
//! # Ok(())
//! # }
//! ```
pub use pgrad_agent as agent;
pub use pgrad_core::{
    error, record, Act, Agent, Configurable, DefaultEvaluator, Env, Evaluator, Obs, Policy,
    Step, Trainer, TrainerConfig, Transition,
};
pub use pgrad_env as env;
