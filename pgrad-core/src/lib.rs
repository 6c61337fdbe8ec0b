#![warn(missing_docs)]
//! Core of pgrad, a small library of online policy-gradient agents.
//!
//! This crate defines the contracts between an environment ([`Env`]), a
//! stochastic policy ([`Policy`]) and a learning agent ([`Agent`]), and the
//! interaction loop ([`Trainer`]) that drives an agent against an environment
//! for a fixed budget of transitions.
//!
//! Concrete policies and update rules live in `pgrad-agent`; environments
//! live in `pgrad-env`.
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Agent, Configurable, Env, Info, Obs, Policy, Step, Transition};

mod trainer;
pub use trainer::{Trainer, TrainerConfig};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
