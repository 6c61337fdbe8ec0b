use super::{ascend, check_learning_rate, UpdateRule};
use crate::{EpisodeBuffer, Gradient};
use anyhow::Result;
use log::trace;
use pgrad_core::{
    error::PgError,
    record::{Record, RecordValue},
    Configurable,
};
use serde::{Deserialize, Serialize};

/// Configuration of [`Reinforce`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ReinforceConfig {
    /// Step size of gradient ascent.
    pub learning_rate: f64,
}

impl Default for ReinforceConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
        }
    }
}

impl ReinforceConfig {
    /// Sets the learning rate.
    pub fn learning_rate(mut self, v: f64) -> Self {
        self.learning_rate = v;
        self
    }
}

/// REINFORCE with reward-to-go, one update per episode.
///
/// ```text
/// grad = Σ_t score_t * Σ_{h≥t} r_h
/// params ← params + learning_rate * grad
/// ```
///
/// The returned record has `grad_norm` and `episode_return`, the discounted
/// return of the episode.
#[derive(Debug, Clone)]
pub struct Reinforce {
    learning_rate: f64,
}

impl Configurable for Reinforce {
    type Config = ReinforceConfig;

    fn build(config: Self::Config) -> Result<Self> {
        check_learning_rate(config.learning_rate)?;
        Ok(Self {
            learning_rate: config.learning_rate,
        })
    }
}

impl<G: Gradient> UpdateRule<G> for Reinforce {
    fn end_episode(
        &mut self,
        params: &mut G,
        episode: EpisodeBuffer<G>,
    ) -> Result<Option<Record>, PgError> {
        let rtg = episode.rewards_to_go();
        let grad = match episode.weighted_score_sum(&rtg) {
            Some(grad) => grad,
            None => return Ok(None),
        };
        ascend(params, self.learning_rate, &grad)?;

        let grad_norm = grad.norm();
        trace!("REINFORCE update, |grad| = {}", grad_norm);
        Ok(Some(Record::from_slice(&[
            ("grad_norm", RecordValue::Scalar(grad_norm as f32)),
            ("episode_return", RecordValue::Scalar(rtg[0] as f32)),
        ])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn reinforce(lr: f64) -> Reinforce {
        Reinforce::build(ReinforceConfig::default().learning_rate(lr)).unwrap()
    }

    #[test]
    fn test_ascent_direction() {
        let mut params = Array2::<f64>::zeros((1, 2));
        let mut episode = EpisodeBuffer::new();
        episode.push(1.0, array![[1.0, -1.0]]);
        episode.push(1.0, array![[0.5, 0.0]]);

        let record = reinforce(0.1)
            .end_episode(&mut params, episode)
            .unwrap()
            .unwrap();
        // grad = 2 * [1, -1] + 1 * [0.5, 0] = [2.5, -2]
        assert!((params[[0, 0]] - 0.25).abs() < 1e-12);
        assert!((params[[0, 1]] + 0.2).abs() < 1e-12);
        assert_eq!(record.get_scalar("episode_return").unwrap(), 2.0);
    }

    #[test]
    fn test_non_finite_gradient_is_fatal() {
        let mut params = array![[1.0, 2.0]];
        let mut episode = EpisodeBuffer::new();
        episode.push(f64::INFINITY, array![[1.0, 1.0]]);

        let err = reinforce(0.1)
            .end_episode(&mut params, episode)
            .unwrap_err();
        assert!(matches!(err, PgError::NonFinite(_)));
        assert_eq!(params, array![[1.0, 2.0]]);
    }

    #[test]
    fn test_overflowing_update_leaves_params_untouched() {
        let big = f64::MAX / 2.0;
        let mut params = array![[big]];
        let mut episode = EpisodeBuffer::new();
        episode.push(1.0, array![[big]]);

        // The gradient is finite but big + 4 * big overflows.
        let err = reinforce(4.0)
            .end_episode(&mut params, episode)
            .unwrap_err();
        assert!(matches!(err, PgError::NonFinite(_)));
        assert_eq!(params, array![[big]]);
    }

    #[test]
    fn test_invalid_learning_rate() {
        for lr in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(Reinforce::build(ReinforceConfig::default().learning_rate(lr)).is_err());
        }
    }
}
