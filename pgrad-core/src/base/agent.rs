//! Agent.
use super::{Env, Policy, Transition};
use crate::record::Record;
use anyhow::Result;

/// Represents a trainable policy on an environment.
///
/// [`Policy::sample`] plays the role of `act(state)`. The agent owns its
/// policy parameters and a sequential random source; both are reinitialized
/// by [`Agent::reset`].
pub trait Agent<E: Env>: Policy<E> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    fn eval(&mut self);

    /// Feeds a transition to the agent.
    ///
    /// When `transition.is_done` is `true` the agent finishes the episode,
    /// which typically means applying a parameter update. The returned
    /// record, if any, describes that update.
    fn observe_step(&mut self, transition: &Transition<E>) -> Result<Option<Record>>;

    /// Reinitializes parameters and reseeds the random source, dropping any
    /// in-progress episode.
    fn reset(&mut self, seed: u64);
}
