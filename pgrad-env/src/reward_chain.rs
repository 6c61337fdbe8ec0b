//! A synthetic chain with a single rewarded action.
use crate::{DiscreteAct, VecObs};
use anyhow::Result;
use log::debug;
use pgrad_core::{error::PgError, Env, Step};
use serde::{Deserialize, Serialize};

/// Configuration of [`RewardChain`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RewardChainConfig {
    /// Number of states, encoded one-hot.
    pub n_states: usize,

    /// Number of actions.
    pub n_actions: usize,

    /// The action yielding reward `1.0`.
    pub rewarded_action: usize,

    /// Number of steps of every episode.
    pub episode_len: usize,
}

impl Default for RewardChainConfig {
    fn default() -> Self {
        Self {
            n_states: 2,
            n_actions: 2,
            rewarded_action: 0,
            episode_len: 5,
        }
    }
}

impl RewardChainConfig {
    /// Sets the number of states.
    pub fn n_states(mut self, v: usize) -> Self {
        self.n_states = v;
        self
    }

    /// Sets the number of actions.
    pub fn n_actions(mut self, v: usize) -> Self {
        self.n_actions = v;
        self
    }

    /// Sets the rewarded action.
    pub fn rewarded_action(mut self, v: usize) -> Self {
        self.rewarded_action = v;
        self
    }

    /// Sets the episode length.
    pub fn episode_len(mut self, v: usize) -> Self {
        self.episode_len = v;
        self
    }

    fn validate(&self) -> Result<(), PgError> {
        if self.n_states == 0 || self.n_actions == 0 || self.episode_len == 0 {
            return Err(PgError::InvalidConfig(format!(
                "n_states, n_actions and episode_len must be positive: {:?}",
                self
            )));
        }
        if self.rewarded_action >= self.n_actions {
            return Err(PgError::InvalidAction {
                action: self.rewarded_action,
                n_actions: self.n_actions,
            });
        }
        Ok(())
    }
}

/// Deterministic chain of one-hot states.
///
/// Episodes start in state `0` and last exactly `episode_len` steps. Taking
/// action `a` yields `1.0` if `a` is the rewarded action, `0.0` otherwise, and
/// moves to state `a % n_states`. The seed is ignored.
pub struct RewardChain {
    config: RewardChainConfig,
    state: usize,
    n_steps: usize,
    done: bool,
}

impl RewardChain {
    /// Index of the current state.
    pub fn state(&self) -> usize {
        self.state
    }

    fn obs(&self) -> VecObs {
        let mut v = vec![0.0; self.config.n_states];
        v[self.state] = 1.0;
        VecObs(v)
    }
}

impl Env for RewardChain {
    type Config = RewardChainConfig;
    type Obs = VecObs;
    type Act = DiscreteAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            state: 0,
            n_steps: 0,
            done: true,
        })
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        if self.done {
            return Err(PgError::EpisodeFinished.into());
        }
        if a.0 >= self.config.n_actions {
            return Err(PgError::InvalidAction {
                action: a.0,
                n_actions: self.config.n_actions,
            }
            .into());
        }

        let reward = match a.0 == self.config.rewarded_action {
            true => 1.0,
            false => 0.0,
        };
        self.state = a.0 % self.config.n_states;
        self.n_steps += 1;
        self.done = self.n_steps >= self.config.episode_len;

        Ok(Step::new(self.obs(), *a, reward, self.done, false, ()))
    }

    fn reset(&mut self, _seed: Option<u64>) -> Result<Self::Obs> {
        self.state = 0;
        self.n_steps = 0;
        self.done = false;
        Ok(self.obs())
    }

    fn state_dim(&self) -> usize {
        self.config.n_states
    }

    fn n_actions(&self) -> usize {
        self.config.n_actions
    }

    fn render(&mut self) -> Result<()> {
        debug!("chain t={} state={}", self.n_steps, self.state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode() {
        let mut env = RewardChain::build(&RewardChainConfig::default(), 0).unwrap();
        assert_eq!(env.reset(None).unwrap(), VecObs(vec![1.0, 0.0]));

        let actions = [0, 1, 1, 0, 1];
        let mut rewards = vec![];
        for (t, &a) in actions.iter().enumerate() {
            let step = env.step(&DiscreteAct(a)).unwrap();
            rewards.push(step.reward);
            assert_eq!(env.state(), a);
            assert_eq!(step.obs.0[a], 1.0);
            assert_eq!(step.is_done(), t == 4);
        }
        assert_eq!(rewards, vec![1.0, 0.0, 0.0, 1.0, 0.0]);
        assert!(env.step(&DiscreteAct(0)).is_err());
    }

    #[test]
    fn test_more_actions_than_states() {
        let config = RewardChainConfig::default()
            .n_states(2)
            .n_actions(3)
            .rewarded_action(2);
        let mut env = RewardChain::build(&config, 0).unwrap();
        env.reset(None).unwrap();
        let step = env.step(&DiscreteAct(2)).unwrap();
        assert_eq!(step.reward, 1.0);
        assert_eq!(env.state(), 0);
        assert!(env.step(&DiscreteAct(3)).is_err());
    }

    #[test]
    fn test_invalid_config() {
        let config = RewardChainConfig::default().rewarded_action(2);
        assert!(RewardChain::build(&config, 0).is_err());
        let config = RewardChainConfig::default().episode_len(0);
        assert!(RewardChain::build(&config, 0).is_err());
    }

    #[test]
    fn test_serde_config() {
        let config = RewardChainConfig::default().episode_len(8);
        let yaml = serde_yaml::to_string(&config).unwrap();
        let config_: RewardChainConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, config_);
    }
}
