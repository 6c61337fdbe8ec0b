//! Environment step.
use super::Env;

/// Additional information to `Obs` and `Act`.
pub trait Info {}

impl Info for () {}

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with some additional information.
///
/// An environment emits [`Step`] object at every interaction step.
pub struct Step<E: Env> {
    /// Action.
    pub act: E::Act,

    /// Observation.
    pub obs: E::Obs,

    /// Reward.
    pub reward: f64,

    /// Flag denoting if episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if episode is truncated.
    pub is_truncated: bool,

    /// Information defined by user.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(
        obs: E::Obs,
        act: E::Act,
        reward: f64,
        is_terminated: bool,
        is_truncated: bool,
        info: E::Info,
    ) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}

/// A transition handed to [`Agent::observe_step`](crate::Agent::observe_step).
///
/// `discounted_reward` is the reward already multiplied by
/// `discount^k`, where `k` counts steps from the start of the current episode.
pub struct Transition<'a, E: Env> {
    /// State in which the action was taken.
    pub obs: &'a E::Obs,

    /// Action taken.
    pub act: &'a E::Act,

    /// Discounted reward.
    pub discounted_reward: f64,

    /// State after the action.
    pub next_obs: &'a E::Obs,

    /// Whether the episode ended with this transition.
    pub is_done: bool,
}
