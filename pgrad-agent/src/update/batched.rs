use super::{ascend, check_learning_rate, UpdateRule};
use crate::{EpisodeBuffer, Gradient};
use anyhow::Result;
use log::debug;
use pgrad_core::{
    error::PgError,
    record::{Record, RecordValue},
    Configurable,
};
use serde::{Deserialize, Serialize};

/// Baseline subtracted from the reward-to-go of a batch.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum Baseline {
    /// Raw reward-to-go.
    #[default]
    None,

    /// Per-timestep mean reward-to-go.
    ///
    /// `b_t` is the mean of `G_t` over the episodes of the batch that lasted
    /// longer than `t` steps.
    MeanReturn,
}

/// Configuration of [`BatchedReinforce`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct BatchedReinforceConfig {
    /// Step size of gradient ascent.
    pub learning_rate: f64,

    /// Number of episodes averaged into one update.
    pub n_episodes: usize,

    /// Baseline.
    #[serde(default)]
    pub baseline: Baseline,
}

impl Default for BatchedReinforceConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            n_episodes: 10,
            baseline: Baseline::None,
        }
    }
}

impl BatchedReinforceConfig {
    /// Sets the learning rate.
    pub fn learning_rate(mut self, v: f64) -> Self {
        self.learning_rate = v;
        self
    }

    /// Sets the number of episodes per update.
    pub fn n_episodes(mut self, v: usize) -> Self {
        self.n_episodes = v;
        self
    }

    /// Sets the baseline.
    pub fn baseline(mut self, v: Baseline) -> Self {
        self.baseline = v;
        self
    }
}

/// REINFORCE averaged over a batch of episodes.
///
/// Completed episodes are kept apart until `n_episodes` of them are pending;
/// the update then applies the mean of their per-episode gradients. Rewards
/// never cross episode boundaries.
#[derive(Debug, Clone)]
pub struct BatchedReinforce<G> {
    learning_rate: f64,
    n_episodes: usize,
    baseline: Baseline,
    pending: Vec<EpisodeBuffer<G>>,
}

impl<G> BatchedReinforce<G> {
    /// Number of completed episodes waiting for the next update.
    pub fn n_pending(&self) -> usize {
        self.pending.len()
    }
}

impl<G: Gradient> Configurable for BatchedReinforce<G> {
    type Config = BatchedReinforceConfig;

    fn build(config: Self::Config) -> Result<Self> {
        check_learning_rate(config.learning_rate)?;
        if config.n_episodes == 0 {
            return Err(PgError::InvalidConfig("n_episodes must be at least 1".to_string()).into());
        }
        Ok(Self {
            learning_rate: config.learning_rate,
            n_episodes: config.n_episodes,
            baseline: config.baseline,
            pending: Vec::with_capacity(config.n_episodes),
        })
    }
}

/// Mean of `rtgs[i][t]` over the episodes with more than `t` steps.
fn mean_return_baseline(rtgs: &[Vec<f64>]) -> Vec<f64> {
    let max_len = rtgs.iter().map(Vec::len).max().unwrap_or(0);
    (0..max_len)
        .map(|t| {
            let (sum, n) = rtgs
                .iter()
                .filter_map(|g| g.get(t))
                .fold((0.0, 0usize), |(s, n), g| (s + g, n + 1));
            sum / n as f64
        })
        .collect()
}

impl<G: Gradient> BatchedReinforce<G> {
    fn update(&mut self, params: &mut G) -> Result<Option<Record>, PgError> {
        let batch = std::mem::take(&mut self.pending);
        let rtgs: Vec<Vec<f64>> = batch.iter().map(|e| e.rewards_to_go()).collect();
        let baseline = match self.baseline {
            Baseline::None => None,
            Baseline::MeanReturn => Some(mean_return_baseline(&rtgs)),
        };

        let mut grad: Option<G> = None;
        for (episode, rtg) in batch.iter().zip(rtgs.iter()) {
            let weights: Vec<f64> = match &baseline {
                None => rtg.clone(),
                Some(b) => rtg.iter().zip(b.iter()).map(|(g, b)| g - b).collect(),
            };
            if let Some(g) = episode.weighted_score_sum(&weights) {
                match grad.as_mut() {
                    Some(acc) => acc.axpy(1.0, &g),
                    None => grad = Some(g),
                }
            }
        }
        let grad = match grad {
            Some(grad) => grad,
            None => return Ok(None),
        };

        let n = batch.len() as f64;
        ascend(params, self.learning_rate / n, &grad)?;

        let grad_norm = grad.norm() / n;
        let mean_return = rtgs.iter().map(|g| g[0]).sum::<f64>() / n;
        debug!(
            "batched REINFORCE update over {} episodes, |grad| = {}",
            batch.len(),
            grad_norm
        );
        Ok(Some(Record::from_slice(&[
            ("grad_norm", RecordValue::Scalar(grad_norm as f32)),
            ("batch_mean_return", RecordValue::Scalar(mean_return as f32)),
        ])))
    }
}

impl<G: Gradient> UpdateRule<G> for BatchedReinforce<G> {
    fn end_episode(
        &mut self,
        params: &mut G,
        episode: EpisodeBuffer<G>,
    ) -> Result<Option<Record>, PgError> {
        if episode.is_empty() {
            return Ok(None);
        }
        self.pending.push(episode);
        if self.pending.len() < self.n_episodes {
            return Ok(None);
        }
        self.update(params)
    }

    fn reset(&mut self) {
        self.pending.clear();
    }
}
