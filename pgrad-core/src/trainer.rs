//! Interaction loop driving an [`Agent`] against an [`Env`].
mod config;
use crate::{
    record::{AggregateRecorder, Record, RecordValue::Scalar},
    Agent, Env, Transition,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::{debug, info};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the interaction loop.
///
/// # Interaction loop
///
/// 0. Given an agent implementing [`Agent`] and an environment implementing [`Env`].
/// 1. `agent.reset(seed)`, `obs = env.reset(Some(seed))`, `last_reset_step = 0`,
///    `performance = 0`.
/// 2. For `t` in `0..n_steps`:
///     1. `act = agent.sample(obs)` and `step = env.step(act)`.
///     2. `discounted_reward = reward * discount^(t - last_reset_step)`, i.e., the
///        exponent restarts at zero in every episode.
///     3. `performance += discounted_reward` and the transition is handed to
///        [`Agent::observe_step`].
///     4. If the episode ended, `performance` is appended to the output,
///        `obs = env.reset(None)` and `last_reset_step = t + 1`. Otherwise
///        `obs` advances to the next observation.
/// 3. Return the performances of the completed episodes. The performance of
///    an episode still running after `n_steps` transitions is discarded.
///
/// Errors of the environment or the agent abort the loop and are returned
/// unchanged; nothing is retried.
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|Env::Obs|A
///     B -->|"Step&lt;E: Env&gt;"|C[Trainer]
///     C -->|Transition|A
/// ```
pub struct Trainer {
    /// Total number of environment steps.
    n_steps: usize,

    /// Discount factor.
    discount: f64,

    /// Seed of the agent and the first reset of the environment.
    seed: u64,

    /// If `true`, [`Env::render`] is called after every reset and step.
    render: bool,

    /// Interval of flushing records in completed episodes.
    flush_record_interval: usize,
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            n_steps: config.n_steps,
            discount: config.discount,
            seed: config.seed,
            render: config.render,
            flush_record_interval: config.flush_record_interval,
        })
    }

    /// Runs the interaction loop and returns per-episode discounted performances.
    pub fn train<E, A>(
        &mut self,
        env: &mut E,
        agent: &mut A,
        recorder: &mut dyn AggregateRecorder,
    ) -> Result<Vec<f64>>
    where
        E: Env,
        A: Agent<E>,
    {
        agent.reset(self.seed);
        agent.train();

        let mut obs = env.reset(Some(self.seed))?;
        if self.render {
            env.render()?;
        }

        let mut performances = Vec::new();
        let mut performance = 0f64;
        let mut last_reset_step = 0usize;
        let mut n_flushed = 0usize;

        for t in 0..self.n_steps {
            let act = agent.sample(&obs)?;
            let step = env.step(&act)?;
            if self.render {
                env.render()?;
            }

            // The exponent is the step index within the current episode.
            let k = (t - last_reset_step) as i32;
            let discounted_reward = step.reward * self.discount.powi(k);
            performance += discounted_reward;
            let is_done = step.is_done();

            let record_agent = agent.observe_step(&Transition {
                obs: &obs,
                act: &act,
                discounted_reward,
                next_obs: &step.obs,
                is_done,
            })?;

            if is_done {
                let episode = performances.len();
                let episode_length = t + 1 - last_reset_step;
                debug!(
                    "Episode {} finished after {} steps, performance = {}",
                    episode, episode_length, performance
                );
                performances.push(performance);

                let mut record = Record::from_slice(&[
                    ("episode", Scalar(episode as f32)),
                    ("performance", Scalar(performance as f32)),
                    ("episode_length", Scalar(episode_length as f32)),
                ]);
                if let Some(r) = record_agent {
                    record.merge_inplace(r);
                }
                recorder.store(record);

                if performances.len() % self.flush_record_interval == 0 {
                    recorder.flush(performances.len() as i64);
                    n_flushed = performances.len();
                }

                performance = 0.0;
                last_reset_step = t + 1;
                obs = env.reset(None)?;
                if self.render {
                    env.render()?;
                }
            } else {
                obs = step.obs;
            }
        }

        if performances.len() > n_flushed {
            recorder.flush(performances.len() as i64);
        }
        info!(
            "Finished {} steps, {} episodes completed",
            self.n_steps,
            performances.len()
        );

        Ok(performances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record::BufferedRecorder, Act, Obs, Policy, Step};
    use anyhow::anyhow;
    use test_log::test;

    #[derive(Clone, Debug)]
    struct CountObs(usize);

    impl Obs for CountObs {}

    #[derive(Clone, Debug)]
    struct CountAct(usize);

    impl Act for CountAct {}

    #[derive(Clone)]
    struct CountEnvConfig {
        episode_len: usize,
        fail_at: Option<usize>,
    }

    /// Emits reward 1 at every step and ends episodes after `episode_len` steps.
    struct CountEnv {
        config: CountEnvConfig,
        t: usize,
        total_steps: usize,
        reset_seeds: Vec<Option<u64>>,
        n_renders: usize,
    }

    impl Env for CountEnv {
        type Config = CountEnvConfig;
        type Obs = CountObs;
        type Act = CountAct;
        type Info = ();

        fn build(config: &Self::Config, _seed: u64) -> Result<Self> {
            Ok(Self {
                config: config.clone(),
                t: 0,
                total_steps: 0,
                reset_seeds: vec![],
                n_renders: 0,
            })
        }

        fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
            if Some(self.total_steps) == self.config.fail_at {
                return Err(anyhow!("simulator failure"));
            }
            self.t += 1;
            self.total_steps += 1;
            let done = self.t == self.config.episode_len;
            Ok(Step::new(CountObs(self.t), a.clone(), 1.0, done, false, ()))
        }

        fn reset(&mut self, seed: Option<u64>) -> Result<Self::Obs> {
            self.reset_seeds.push(seed);
            self.t = 0;
            Ok(CountObs(0))
        }

        fn state_dim(&self) -> usize {
            1
        }

        fn n_actions(&self) -> usize {
            1
        }

        fn render(&mut self) -> Result<()> {
            self.n_renders += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingAgent {
        discounted_rewards: Vec<f64>,
        observed_states: Vec<usize>,
        dones: Vec<bool>,
        seeds: Vec<u64>,
    }

    impl Policy<CountEnv> for RecordingAgent {
        fn sample(&mut self, obs: &CountObs) -> Result<CountAct> {
            self.observed_states.push(obs.0);
            Ok(CountAct(0))
        }
    }

    impl Agent<CountEnv> for RecordingAgent {
        fn train(&mut self) {}

        fn eval(&mut self) {}

        fn observe_step(&mut self, transition: &Transition<CountEnv>) -> Result<Option<Record>> {
            self.discounted_rewards.push(transition.discounted_reward);
            self.dones.push(transition.is_done);
            Ok(match transition.is_done {
                true => Some(Record::from_scalar("grad_norm", 0.0)),
                false => None,
            })
        }

        fn reset(&mut self, seed: u64) {
            self.seeds.push(seed);
        }
    }

    fn env(episode_len: usize, fail_at: Option<usize>) -> CountEnv {
        CountEnv::build(
            &CountEnvConfig {
                episode_len,
                fail_at,
            },
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_discount_restarts_every_episode() -> Result<()> {
        let mut env = env(3, None);
        let mut agent = RecordingAgent::default();
        let mut recorder = BufferedRecorder::new();
        let config = TrainerConfig::default().n_steps(9).discount(0.5).seed(7);
        let perfs = Trainer::build(config)?.train(&mut env, &mut agent, &mut recorder)?;

        let expected = [1.0, 0.5, 0.25].repeat(3);
        assert_eq!(agent.discounted_rewards, expected);
        assert_eq!(perfs, vec![1.75; 3]);
        assert_eq!(agent.observed_states, [0, 1, 2].repeat(3));
        Ok(())
    }

    #[test]
    fn test_discount_is_exact_power_of_step_index() -> Result<()> {
        let mut env = env(60, None);
        let mut agent = RecordingAgent::default();
        let mut recorder = BufferedRecorder::new();
        let config = TrainerConfig::default().n_steps(120).discount(0.9);
        Trainer::build(config)?.train(&mut env, &mut agent, &mut recorder)?;

        assert_eq!(agent.discounted_rewards.len(), 120);
        for (t, r) in agent.discounted_rewards.iter().enumerate() {
            assert_eq!(*r, 0.9f64.powi((t % 60) as i32), "t = {}", t);
        }
        Ok(())
    }

    #[test]
    fn test_render_is_driven_by_trainer_config() -> Result<()> {
        let run = |render: bool| -> Result<(Vec<f64>, usize)> {
            let mut env = env(3, None);
            let mut agent = RecordingAgent::default();
            let mut recorder = BufferedRecorder::new();
            let config = TrainerConfig::default()
                .n_steps(7)
                .discount(0.5)
                .render(render);
            let perfs = Trainer::build(config)?.train(&mut env, &mut agent, &mut recorder)?;
            Ok((perfs, env.n_renders))
        };

        let (perfs_off, renders_off) = run(false)?;
        let (perfs_on, renders_on) = run(true)?;
        assert_eq!(perfs_off, perfs_on);
        assert_eq!(renders_off, 0);
        // One render per step plus one per reset (the initial one and two more).
        assert_eq!(renders_on, 7 + 3);
        Ok(())
    }

    #[test]
    fn test_exact_step_budget_drops_partial_episode() -> Result<()> {
        let mut env = env(3, None);
        let mut agent = RecordingAgent::default();
        let mut recorder = BufferedRecorder::new();
        let config = TrainerConfig::default().n_steps(7).discount(1.0).seed(3);
        let perfs = Trainer::build(config)?.train(&mut env, &mut agent, &mut recorder)?;

        assert_eq!(env.total_steps, 7);
        assert_eq!(perfs, vec![3.0, 3.0]);
        assert_eq!(agent.seeds, vec![3]);
        assert_eq!(env.reset_seeds, vec![Some(3), None, None]);
        assert_eq!(
            agent.dones,
            vec![false, false, true, false, false, true, false]
        );
        Ok(())
    }

    #[test]
    fn test_episode_records() -> Result<()> {
        let mut env = env(2, None);
        let mut agent = RecordingAgent::default();
        let mut recorder = BufferedRecorder::new();
        let config = TrainerConfig::default()
            .n_steps(10)
            .discount(1.0)
            .flush_record_interval(2);
        Trainer::build(config)?.train(&mut env, &mut agent, &mut recorder)?;

        assert_eq!(recorder.len(), 5);
        assert_eq!(recorder.n_flushes(), 3);
        for (i, r) in recorder.iter().enumerate() {
            assert_eq!(r.get_scalar("episode")?, i as f32);
            assert_eq!(r.get_scalar("performance")?, 2.0);
            assert_eq!(r.get_scalar("episode_length")?, 2.0);
            assert_eq!(r.get_scalar("grad_norm")?, 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_env_error_propagates() -> Result<()> {
        let mut env = env(3, Some(4));
        let mut agent = RecordingAgent::default();
        let mut recorder = BufferedRecorder::new();
        let config = TrainerConfig::default().n_steps(10);
        let err = Trainer::build(config)?
            .train(&mut env, &mut agent, &mut recorder)
            .unwrap_err();

        assert_eq!(err.to_string(), "simulator failure");
        assert_eq!(agent.discounted_rewards.len(), 4);
        Ok(())
    }

    #[test]
    fn test_invalid_discount_is_rejected() {
        assert!(Trainer::build(TrainerConfig::default().discount(0.0)).is_err());
    }
}
