//! Evaluate [`Policy`](crate::Policy).
use crate::{record::Record, Env, Policy};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluate [`Policy`](crate::Policy).
pub trait Evaluator<E: Env> {
    /// Evaluate the given policy.
    ///
    /// The caller of this method needs to handle the internal state of the
    /// policy, like training/evaluation mode of an [`Agent`](crate::Agent).
    fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<Record>;
}
