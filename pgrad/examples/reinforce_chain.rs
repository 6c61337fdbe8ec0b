//! REINFORCE on a two-state chain where action 0 is always rewarded.
//!
//! A learning agent approaches the maximum return, 5 with the default episode
//! length, while the uniform policy stays around 2.5.
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use pgrad_agent::{
    LinearSoftmax, LinearSoftmaxConfig, Mlp, MlpConfig, NoUpdate, PgAgent, PolicyModel,
    Reinforce, ReinforceConfig, UpdateRule,
};
use pgrad_core::{record::LogRecorder, Configurable, Env as _, Trainer, TrainerConfig};
use pgrad_env::{RewardChain, RewardChainConfig};

type Env = RewardChain;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyKind {
    /// Linear softmax policy, never updated
    Fixed,
    /// Linear softmax policy
    Linear,
    /// Perceptron with one hidden layer
    Mlp,
}

/// Train a REINFORCE agent on a synthetic reward chain
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of environment steps
    #[arg(long, default_value_t = 250)]
    n_steps: usize,

    /// Random seed of the agent
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Discount factor in (0, 1]
    #[arg(long, default_value_t = 1.0)]
    discount: f64,

    /// Learning rate of gradient ascent
    #[arg(long, default_value_t = 0.1)]
    learning_rate: f64,

    /// Length of an episode
    #[arg(long, default_value_t = 5)]
    episode_len: usize,

    /// Policy
    #[arg(long, value_enum, default_value_t = PolicyKind::Linear)]
    policy: PolicyKind,

    /// Log the state of the chain after every step
    #[arg(long, default_value_t = false)]
    render: bool,
}

fn train<M, U>(args: &Args, model: M, update: U) -> Result<Vec<f64>>
where
    M: PolicyModel,
    U: UpdateRule<M::Params>,
{
    let env_config = RewardChainConfig::default()
        .episode_len(args.episode_len);
    let mut env = Env::build(&env_config, args.seed)?;
    let mut agent = PgAgent::<Env, M, U>::new(model, update, args.seed);
    let mut trainer = Trainer::build(
        TrainerConfig::default()
            .n_steps(args.n_steps)
            .discount(args.discount)
            .seed(args.seed)
            .flush_record_interval(10)
            .render(args.render),
    )?;
    trainer.train(&mut env, &mut agent, &mut LogRecorder::new())
}

fn run(args: &Args) -> Result<Vec<f64>> {
    let linear = || LinearSoftmax::build(LinearSoftmaxConfig::new(2, 2));
    let reinforce = || Reinforce::build(ReinforceConfig::default().learning_rate(args.learning_rate));
    match args.policy {
        PolicyKind::Fixed => train(args, linear()?, NoUpdate),
        PolicyKind::Linear => train(args, linear()?, reinforce()?),
        PolicyKind::Mlp => train(args, Mlp::build(MlpConfig::new(2, vec![8], 2))?, reinforce()?),
    }
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let performances = run(&args)?;

    let n = (performances.len() / 5).max(1).min(performances.len());
    if n > 0 {
        info!(
            "mean performance: first {} episodes {:.3}, last {} episodes {:.3}",
            n,
            mean(&performances[..n]),
            n,
            mean(&performances[performances.len() - n..])
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinforce_chain() -> Result<()> {
        let args = Args {
            n_steps: 250,
            seed: 0,
            discount: 1.0,
            learning_rate: 0.1,
            episode_len: 5,
            policy: PolicyKind::Linear,
            render: false,
        };
        let performances = run(&args)?;
        assert_eq!(performances.len(), 50);
        assert!(mean(&performances[40..]) > mean(&performances[..10]));
        Ok(())
    }
}
