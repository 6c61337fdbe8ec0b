//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{error::PgError, record::Record, Env, Policy};
use anyhow::Result;
use log::info;

/// Runs a fixed number of episodes and reports the average undiscounted return.
///
/// The `i`-th episode starts from [`Env::reset_with_index`]`(i)`, so the
/// evaluation is reproducible. Episodes longer than `max_steps` are cut.
pub struct DefaultEvaluator<E: Env> {
    n_episodes: usize,
    max_steps: usize,
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<Record> {
        let mut r_total = 0f64;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;
            let mut r_episode = 0f64;

            for _ in 0..self.max_steps {
                let act = policy.sample(&prev_obs)?;
                let step = self.env.step(&act)?;
                r_episode += step.reward;
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }
            info!("Evaluation episode {}: return = {}", ix, r_episode);
            r_total += r_episode;
        }

        Ok(Record::from_scalar(
            "Episode return",
            (r_total / self.n_episodes as f64) as f32,
        ))
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `config` - Configuration of the environment
    /// * `seed` - Random seed of the environment
    /// * `n_episodes` - Number of episodes per evaluation
    pub fn new(config: &E::Config, seed: u64, n_episodes: usize) -> Result<Self> {
        if n_episodes == 0 {
            return Err(PgError::InvalidConfig("n_episodes must be positive".to_string()).into());
        }
        Ok(Self {
            n_episodes,
            max_steps: usize::MAX,
            env: E::build(config, seed)?,
        })
    }

    /// Sets the maximum number of steps of an evaluation episode.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }
}
