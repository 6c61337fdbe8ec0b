//! Cart-pole balancing.
use crate::{DiscreteAct, VecObs};
use anyhow::Result;
use log::{debug, trace};
use pgrad_core::{error::PgError, Env, Step};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const GRAVITY: f64 = 9.8;
const MASS_CART: f64 = 1.0;
const MASS_POLE: f64 = 0.1;
const TOTAL_MASS: f64 = MASS_CART + MASS_POLE;
const HALF_LENGTH: f64 = 0.5;
const POLE_MASS_LENGTH: f64 = MASS_POLE * HALF_LENGTH;
const FORCE_MAG: f64 = 10.0;
const TAU: f64 = 0.02;
const X_THRESHOLD: f64 = 2.4;
const THETA_THRESHOLD: f64 = 12.0 * 2.0 * PI / 360.0;
const INIT_RANGE: f64 = 0.05;

/// Configuration of [`CartPole`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CartPoleConfig {
    /// Episodes are truncated after this many steps.
    pub max_steps: usize,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self { max_steps: 500 }
    }
}

impl CartPoleConfig {
    /// Sets the episode length limit.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }
}

/// A pole hinged on a cart moving along a frictionless track.
///
/// The state is `[x, x_dot, theta, theta_dot]`. Action `0` pushes the cart to
/// the left and action `1` to the right. Every step yields reward `1.0`; the
/// episode terminates when the cart leaves `[-2.4, 2.4]` or the pole leans
/// more than 12 degrees, and is truncated after `max_steps` steps.
pub struct CartPole {
    state: [f64; 4],
    rng: StdRng,
    max_steps: usize,
    n_steps: usize,
    done: bool,
}

impl CartPole {
    /// Current state.
    pub fn state(&self) -> &[f64; 4] {
        &self.state
    }

    fn obs(&self) -> VecObs {
        VecObs(self.state.to_vec())
    }

    fn is_failed(&self) -> bool {
        let [x, _, theta, _] = self.state;
        !(-X_THRESHOLD..=X_THRESHOLD).contains(&x)
            || !(-THETA_THRESHOLD..=THETA_THRESHOLD).contains(&theta)
    }

    /// Explicit Euler integration of the dynamics over one step.
    fn integrate(&mut self, force: f64) {
        let [x, x_dot, theta, theta_dot] = self.state;
        let (sin, cos) = theta.sin_cos();
        let temp = (force + POLE_MASS_LENGTH * theta_dot * theta_dot * sin) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin - cos * temp)
            / (HALF_LENGTH * (4.0 / 3.0 - MASS_POLE * cos * cos / TOTAL_MASS));
        let x_acc = temp - POLE_MASS_LENGTH * theta_acc * cos / TOTAL_MASS;

        self.state = [
            x + TAU * x_dot,
            x_dot + TAU * x_acc,
            theta + TAU * theta_dot,
            theta_dot + TAU * theta_acc,
        ];
    }
}

impl Env for CartPole {
    type Config = CartPoleConfig;
    type Obs = VecObs;
    type Act = DiscreteAct;
    type Info = ();

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        if config.max_steps == 0 {
            return Err(PgError::InvalidConfig("max_steps must be positive".to_string()).into());
        }
        Ok(Self {
            state: [0.0; 4],
            rng: StdRng::seed_from_u64(seed),
            max_steps: config.max_steps,
            n_steps: 0,
            done: true,
        })
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        if self.done {
            return Err(PgError::EpisodeFinished.into());
        }
        let force = match a.0 {
            0 => -FORCE_MAG,
            1 => FORCE_MAG,
            action => {
                return Err(PgError::InvalidAction {
                    action,
                    n_actions: 2,
                }
                .into())
            }
        };

        self.integrate(force);
        self.n_steps += 1;
        let is_terminated = self.is_failed();
        let is_truncated = !is_terminated && self.n_steps >= self.max_steps;
        self.done = is_terminated || is_truncated;
        trace!("cart-pole step {}: {:?}", self.n_steps, self.state);

        Ok(Step::new(
            self.obs(),
            *a,
            1.0,
            is_terminated,
            is_truncated,
            (),
        ))
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Obs> {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        for s in self.state.iter_mut() {
            *s = self.rng.gen_range(-INIT_RANGE..INIT_RANGE);
        }
        self.n_steps = 0;
        self.done = false;
        Ok(self.obs())
    }

    fn state_dim(&self) -> usize {
        4
    }

    fn n_actions(&self) -> usize {
        2
    }

    fn render(&mut self) -> Result<()> {
        let [x, x_dot, theta, theta_dot] = self.state;
        debug!(
            "cart-pole t={} x={:.3} x_dot={:.3} theta={:.3} theta_dot={:.3}",
            self.n_steps, x, x_dot, theta, theta_dot
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_pole(max_steps: usize) -> CartPole {
        CartPole::build(&CartPoleConfig::default().max_steps(max_steps), 0).unwrap()
    }

    #[test]
    fn test_reset_is_seeded() {
        let mut env = cart_pole(500);
        let obs1 = env.reset(Some(1)).unwrap();
        let obs2 = env.reset(Some(1)).unwrap();
        let obs3 = env.reset(None).unwrap();
        assert_eq!(obs1, obs2);
        assert_ne!(obs1, obs3);
        assert!(obs1.0.iter().all(|x| x.abs() <= INIT_RANGE));
    }

    #[test]
    fn test_pushing_one_way_fails() {
        let mut env = cart_pole(500);
        env.reset(Some(0)).unwrap();
        let mut n = 0;
        loop {
            let step = env.step(&DiscreteAct(1)).unwrap();
            n += 1;
            assert_eq!(step.reward, 1.0);
            if step.is_done() {
                assert!(step.is_terminated);
                assert!(!step.is_truncated);
                break;
            }
        }
        // The pole falls within a couple of seconds.
        assert!(n < 100, "{}", n);
    }

    #[test]
    fn test_truncation() {
        let mut env = cart_pole(3);
        env.reset(Some(0)).unwrap();
        // Alternating pushes keep the pole up for a few steps.
        let s1 = env.step(&DiscreteAct(0)).unwrap();
        let s2 = env.step(&DiscreteAct(1)).unwrap();
        let s3 = env.step(&DiscreteAct(0)).unwrap();
        assert!(!s1.is_done() && !s2.is_done());
        assert!(s3.is_truncated && !s3.is_terminated);
    }

    #[test]
    fn test_step_after_done() {
        let mut env = cart_pole(1);
        assert!(env.step(&DiscreteAct(0)).is_err());
        env.reset(Some(0)).unwrap();
        env.step(&DiscreteAct(0)).unwrap();
        match env.step(&DiscreteAct(0)) {
            Ok(_) => panic!("step after the end of an episode must fail"),
            Err(err) => assert_eq!(
                err.downcast_ref::<PgError>(),
                Some(&PgError::EpisodeFinished)
            ),
        }
    }

    #[test]
    fn test_invalid_action() {
        let mut env = cart_pole(10);
        env.reset(Some(0)).unwrap();
        assert!(env.step(&DiscreteAct(2)).is_err());
    }

    #[test]
    fn test_dynamics_from_rest() {
        let mut env = cart_pole(10);
        env.reset(Some(0)).unwrap();
        env.state = [0.0; 4];
        env.step(&DiscreteAct(1)).unwrap();
        let [x, x_dot, theta, theta_dot] = *env.state();
        // Positions move only from the next step on.
        assert_eq!(x, 0.0);
        assert_eq!(theta, 0.0);
        assert!(x_dot > 0.0);
        assert!(theta_dot < 0.0);
    }
}
