//! Environment.
use super::{Act, Info, Obs, Step};
use anyhow::Result;

/// Represents an environment, typically an MDP.
///
/// An environment is single-owner and not re-entrant: during a run only the
/// interaction loop calls [`Env::step`] and [`Env::reset`].
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: u64) -> Result<Self>
    where
        Self: Sized;

    /// Performs an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Starts a new episode and returns its initial observation.
    ///
    /// When `seed` is given, the random source of the environment is reseeded
    /// before drawing the initial state. Otherwise the environment keeps
    /// advancing its current random source.
    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Obs>;

    /// Resets the environment with a given index.
    ///
    /// The index is used as a random seed, which makes evaluation runs
    /// reproducible. This method is called in [`DefaultEvaluator`].
    ///
    /// [`DefaultEvaluator`]: crate::DefaultEvaluator
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.reset(Some(ix as u64))
    }

    /// Dimension of the state vector.
    fn state_dim(&self) -> usize;

    /// Number of discrete actions.
    fn n_actions(&self) -> usize;

    /// Requests a visual display of the current state.
    ///
    /// This has no effect on the learning process.
    fn render(&mut self) -> Result<()> {
        Ok(())
    }
}
