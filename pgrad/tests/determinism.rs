use anyhow::Result;
use ndarray::Array2;
use pgrad::{
    agent::{LinearSoftmax, LinearSoftmaxConfig, PgAgent, Reinforce, ReinforceConfig},
    env::{CartPole, CartPoleConfig, DiscreteAct, VecObs},
    record::NullRecorder,
    Configurable, Env, Step, Trainer, TrainerConfig,
};

/// Cart-pole keeping the list of actions it received.
struct Recording {
    inner: CartPole,
    actions: Vec<usize>,
}

impl Env for Recording {
    type Config = CartPoleConfig;
    type Obs = VecObs;
    type Act = DiscreteAct;
    type Info = ();

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        Ok(Self {
            inner: CartPole::build(config, seed)?,
            actions: vec![],
        })
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        self.actions.push(a.0);
        let s = self.inner.step(a)?;
        Ok(Step::new(
            s.obs,
            s.act,
            s.reward,
            s.is_terminated,
            s.is_truncated,
            (),
        ))
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Obs> {
        self.inner.reset(seed)
    }

    fn state_dim(&self) -> usize {
        self.inner.state_dim()
    }

    fn n_actions(&self) -> usize {
        self.inner.n_actions()
    }
}

fn run(seed: u64) -> Result<(Vec<usize>, Vec<f64>, Array2<f64>)> {
    let mut env = Recording::build(&CartPoleConfig::default(), 123)?;
    let mut agent = PgAgent::<Recording, _, _>::new(
        LinearSoftmax::build(LinearSoftmaxConfig::new(4, 2))?,
        Reinforce::build(ReinforceConfig::default().learning_rate(0.01))?,
        seed,
    );
    let mut trainer = Trainer::build(TrainerConfig::default().n_steps(3000).seed(seed))?;
    let performances = trainer.train(&mut env, &mut agent, &mut NullRecorder::new())?;
    Ok((env.actions, performances, agent.params().clone()))
}

#[test]
fn test_same_seed_same_run() -> Result<()> {
    let (actions1, perfs1, params1) = run(7)?;
    let (actions2, perfs2, params2) = run(7)?;
    assert_eq!(actions1.len(), 3000);
    assert_eq!(actions1, actions2);
    assert_eq!(perfs1, perfs2);
    assert_eq!(params1, params2);
    Ok(())
}

#[test]
fn test_different_seeds_differ() -> Result<()> {
    let (actions1, _, _) = run(7)?;
    let (actions2, _, _) = run(8)?;
    assert_ne!(actions1, actions2);
    Ok(())
}
