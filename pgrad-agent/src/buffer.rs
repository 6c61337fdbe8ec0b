//! Trajectory buffer of one episode.
use crate::Gradient;

/// Ordered `(discounted_reward, score)` pairs of a single episode.
///
/// Rewards are already discounted relative to the start of the episode.
#[derive(Debug, Clone)]
pub struct EpisodeBuffer<G> {
    rewards: Vec<f64>,
    scores: Vec<G>,
}

impl<G> Default for EpisodeBuffer<G> {
    fn default() -> Self {
        Self {
            rewards: Vec::new(),
            scores: Vec::new(),
        }
    }
}

impl<G: Gradient> EpisodeBuffer<G> {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the reward and score of a step.
    pub fn push(&mut self, discounted_reward: f64, score: G) {
        self.rewards.push(discounted_reward);
        self.scores.push(score);
    }

    /// Number of steps in the buffer.
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    /// Returns `true` if the buffer has no step.
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Removes all steps.
    pub fn clear(&mut self) {
        self.rewards.clear();
        self.scores.clear();
    }

    /// Moves the steps out, leaving the buffer empty.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Reward-to-go `Σ_{h≥t} r_h` for every step `t`, in one backward pass.
    pub fn rewards_to_go(&self) -> Vec<f64> {
        let mut rtg = vec![0f64; self.rewards.len()];
        let mut acc = 0f64;
        for (t, r) in self.rewards.iter().enumerate().rev() {
            acc += r;
            rtg[t] = acc;
        }
        rtg
    }

    /// `Σ_t weights[t] * score_t`, or `None` for an empty buffer.
    pub fn weighted_score_sum(&self, weights: &[f64]) -> Option<G> {
        debug_assert_eq!(weights.len(), self.scores.len());
        let mut grad = self.scores.first()?.zeros_like();
        for (w, score) in weights.iter().zip(self.scores.iter()) {
            grad.axpy(*w, score);
        }
        Some(grad)
    }

    /// REINFORCE gradient estimate `Σ_t score_t * G_t` with reward-to-go `G_t`.
    pub fn reinforce_gradient(&self) -> Option<G> {
        self.weighted_score_sum(&self.rewards_to_go())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_rewards_to_go() {
        let mut buf = EpisodeBuffer::<()>::new();
        for r in [1.0, 0.5, 0.25, 0.125] {
            buf.push(r, ());
        }
        assert_eq!(buf.rewards_to_go(), vec![1.875, 0.875, 0.375, 0.125]);
    }

    #[test]
    fn test_reinforce_gradient() {
        let mut buf = EpisodeBuffer::<Array2<f64>>::new();
        buf.push(1.0, array![[1.0, 0.0]]);
        buf.push(2.0, array![[0.0, 1.0]]);
        buf.push(3.0, array![[1.0, 1.0]]);
        // G = [6, 5, 3]
        let grad = buf.reinforce_gradient().unwrap();
        assert_eq!(grad, array![[9.0, 8.0]]);
    }

    #[test]
    fn test_take_empties_buffer() {
        let mut buf = EpisodeBuffer::<()>::new();
        buf.push(1.0, ());
        buf.push(1.0, ());
        let episode = buf.take();
        assert_eq!(episode.len(), 2);
        assert!(buf.is_empty());
        assert!(buf.reinforce_gradient().is_none());
    }
}
