//! Policy-gradient agent.
mod config;
use crate::{util::argmax, EpisodeBuffer, PolicyModel, UpdateRule};
use anyhow::Result;
pub use config::PgAgentConfig;
use log::{debug, trace};
use ndarray::ArrayView1;
use pgrad_core::{error::PgError, record::Record, Agent, Configurable, Env, Policy, Transition};
use rand::{distributions::WeightedIndex, prelude::Distribution, rngs::StdRng, SeedableRng};
use std::marker::PhantomData;

/// An online policy-gradient agent.
///
/// The agent composes a [`PolicyModel`] `M`, which maps parameters and a
/// state to action probabilities and scores, with an [`UpdateRule`] `U`,
/// which consumes every completed episode. While training, each observed
/// step appends `(discounted_reward, score)` to an episode buffer; when the
/// step ends the episode, the buffer is handed to the update rule and emptied
/// before the next action is sampled.
///
/// Observations must expose the state as a slice of `f64` and actions must
/// convert from and into an action index.
pub struct PgAgent<E, M, U>
where
    E: Env,
    M: PolicyModel,
    U: UpdateRule<M::Params>,
{
    model: M,
    params: M::Params,
    update: U,
    buffer: EpisodeBuffer<M::Params>,
    rng: StdRng,
    train: bool,
    n_episodes: usize,
    phantom: PhantomData<E>,
}

impl<E, M, U> PgAgent<E, M, U>
where
    E: Env,
    M: PolicyModel,
    U: UpdateRule<M::Params>,
{
    /// Creates an agent with parameters initialised from `seed`.
    pub fn new(model: M, update: U, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let params = model.init_params(&mut rng);
        Self {
            model,
            params,
            update,
            buffer: EpisodeBuffer::new(),
            rng,
            train: true,
            n_episodes: 0,
            phantom: PhantomData,
        }
    }

    /// The policy model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Current parameters.
    pub fn params(&self) -> &M::Params {
        &self.params
    }

    /// Replaces the parameters.
    pub fn set_params(&mut self, params: M::Params) {
        self.params = params;
    }

    /// Number of steps observed since the last episode boundary.
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Number of episodes completed since the last reset.
    pub fn n_episodes(&self) -> usize {
        self.n_episodes
    }
}

impl<E, M, U> Policy<E> for PgAgent<E, M, U>
where
    E: Env,
    M: PolicyModel,
    U: UpdateRule<M::Params>,
    E::Obs: AsRef<[f64]>,
    E::Act: From<usize> + Into<usize>,
{
    fn sample(&mut self, obs: &E::Obs) -> Result<E::Act> {
        let state: &[f64] = obs.as_ref();
        let probs = self.model.policy(&self.params, ArrayView1::from(state))?;
        let action = match self.train {
            true => {
                let dist = WeightedIndex::new(probs.iter()).map_err(|e| {
                    PgError::NonFinite(format!("action distribution {}: {}", probs, e))
                })?;
                dist.sample(&mut self.rng)
            }
            false => argmax(probs.view()),
        };
        trace!("probs = {}, action = {}", probs, action);
        Ok(action.into())
    }
}

impl<E, M, U> Configurable for PgAgent<E, M, U>
where
    E: Env,
    M: PolicyModel + Configurable,
    U: UpdateRule<M::Params> + Configurable,
{
    type Config = PgAgentConfig<M::Config, U::Config>;

    fn build(config: Self::Config) -> Result<Self> {
        let model = M::build(config.model)?;
        let update = U::build(config.update)?;
        Ok(Self::new(model, update, config.seed))
    }
}

impl<E, M, U> Agent<E> for PgAgent<E, M, U>
where
    E: Env,
    M: PolicyModel,
    U: UpdateRule<M::Params>,
    E::Obs: AsRef<[f64]>,
    E::Act: From<usize> + Into<usize>,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn observe_step(&mut self, transition: &Transition<E>) -> Result<Option<Record>> {
        if !self.train {
            return Ok(None);
        }
        if !transition.discounted_reward.is_finite() {
            return Err(PgError::NonFinite(format!(
                "discounted reward {}",
                transition.discounted_reward
            ))
            .into());
        }

        let state: &[f64] = transition.obs.as_ref();
        let action: usize = transition.act.clone().into();
        let score = self
            .model
            .score(&self.params, ArrayView1::from(state), action)?;
        self.buffer.push(transition.discounted_reward, score);

        if !transition.is_done {
            return Ok(None);
        }

        let episode = self.buffer.take();
        let len = episode.len();
        let record = self.update.end_episode(&mut self.params, episode)?;
        self.n_episodes += 1;
        debug!("episode {} ended after {} steps", self.n_episodes, len);
        Ok(record)
    }

    fn reset(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.params = self.model.init_params(&mut self.rng);
        self.buffer.clear();
        self.update.reset();
        self.n_episodes = 0;
    }
}
