//! Update rules turning completed episodes into parameter updates.
mod batched;
mod reinforce;
use crate::{EpisodeBuffer, Gradient};
use anyhow::Result;
pub use batched::{Baseline, BatchedReinforce, BatchedReinforceConfig};
use pgrad_core::{error::PgError, record::Record, Configurable};
pub use reinforce::{Reinforce, ReinforceConfig};

/// Consumes the trajectory of every completed episode and updates parameters.
pub trait UpdateRule<G: Gradient> {
    /// Called once per completed episode, synchronously, before the next
    /// action is chosen.
    ///
    /// A non-finite gradient is an error and leaves `params` untouched.
    fn end_episode(
        &mut self,
        params: &mut G,
        episode: EpisodeBuffer<G>,
    ) -> Result<Option<Record>, PgError>;

    /// Drops any state kept across episodes.
    fn reset(&mut self) {}
}

/// Leaves parameters untouched; the agent keeps its initial policy.
#[derive(Debug, Clone, Default)]
pub struct NoUpdate;

impl Configurable for NoUpdate {
    type Config = ();

    fn build(_config: ()) -> Result<Self> {
        Ok(Self)
    }
}

impl<G: Gradient> UpdateRule<G> for NoUpdate {
    fn end_episode(
        &mut self,
        _params: &mut G,
        _episode: EpisodeBuffer<G>,
    ) -> Result<Option<Record>, PgError> {
        Ok(None)
    }
}

fn check_learning_rate(lr: f64) -> Result<(), PgError> {
    match lr.is_finite() && lr > 0.0 {
        true => Ok(()),
        false => Err(PgError::InvalidConfig(format!(
            "learning_rate must be positive and finite, got {}",
            lr
        ))),
    }
}

/// Applies `params += learning_rate * grad`.
///
/// `params` is only replaced when both the gradient and the updated
/// parameters are finite.
fn ascend<G: Gradient>(params: &mut G, learning_rate: f64, grad: &G) -> Result<(), PgError> {
    if !grad.is_finite() {
        return Err(PgError::NonFinite("policy gradient".to_string()));
    }
    let mut next = params.clone();
    next.axpy(learning_rate, grad);
    if !next.is_finite() {
        return Err(PgError::NonFinite("updated parameters".to_string()));
    }
    *params = next;
    Ok(())
}
