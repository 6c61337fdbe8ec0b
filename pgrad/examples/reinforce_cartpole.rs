use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use pgrad_agent::{
    Activation, Baseline, BatchedReinforce, BatchedReinforceConfig, LinearSoftmax,
    LinearSoftmaxConfig, Mlp, MlpConfig, NoUpdate, PgAgent, PolicyModel, Reinforce,
    ReinforceConfig, UniformPolicy, UniformPolicyConfig, UpdateRule,
};
use pgrad_core::{
    record::LogRecorder, Agent, Configurable, DefaultEvaluator, Env as _, Evaluator as _,
    Trainer, TrainerConfig,
};
use pgrad_env::{CartPole, CartPoleConfig};

const DIM_OBS: usize = 4;
const DIM_ACT: usize = 2;
const N_EPISODES_PER_EVAL: usize = 10;
const FLUSH_RECORD_INTERVAL: usize = 20;

type Env = CartPole;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyKind {
    /// Uniformly random actions, no learning
    Uniform,
    /// Linear softmax policy
    Linear,
    /// Two-layer perceptron with tanh activation
    Mlp,
}

/// Train a REINFORCE agent on the cart-pole task
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of environment steps
    #[arg(long, default_value_t = 100_000)]
    n_steps: usize,

    /// Random seed of the agent and the environment
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Discount factor in (0, 1]
    #[arg(long, default_value_t = 0.99)]
    discount: f64,

    /// Learning rate of gradient ascent
    #[arg(long, default_value_t = 0.01)]
    learning_rate: f64,

    /// Number of episodes per update, a mean-return baseline is used above 1
    #[arg(long, default_value_t = 1)]
    batch_size: usize,

    /// Policy
    #[arg(long, value_enum, default_value_t = PolicyKind::Linear)]
    policy: PolicyKind,

    /// Log the state of the cart-pole after every step
    #[arg(long, default_value_t = false)]
    render: bool,
}

fn env_config() -> CartPoleConfig {
    CartPoleConfig::default()
}

fn trainer_config(args: &Args) -> TrainerConfig {
    TrainerConfig::default()
        .n_steps(args.n_steps)
        .discount(args.discount)
        .seed(args.seed)
        .flush_record_interval(FLUSH_RECORD_INTERVAL)
        .render(args.render)
}

fn train<M, U>(args: &Args, model: M, update: U) -> Result<Vec<f64>>
where
    M: PolicyModel,
    U: UpdateRule<M::Params>,
{
    let env_config = env_config();
    let mut env = Env::build(&env_config, args.seed)?;
    let mut agent = PgAgent::<Env, M, U>::new(model, update, args.seed);
    let mut trainer = Trainer::build(trainer_config(args))?;
    let mut recorder = LogRecorder::new();
    let performances = trainer.train(&mut env, &mut agent, &mut recorder)?;

    agent.eval();
    let record = DefaultEvaluator::<Env>::new(&env_config, args.seed, N_EPISODES_PER_EVAL)?
        .evaluate(&mut agent)?;
    info!(
        "Greedy policy: mean return {:?} over {} episodes",
        record.get_scalar("Episode return")?,
        N_EPISODES_PER_EVAL
    );

    Ok(performances)
}

fn train_with<M>(args: &Args, model: M) -> Result<Vec<f64>>
where
    M: PolicyModel,
{
    match args.batch_size {
        1 => {
            let config = ReinforceConfig::default().learning_rate(args.learning_rate);
            train(args, model, Reinforce::build(config)?)
        }
        n => {
            let config = BatchedReinforceConfig::default()
                .learning_rate(args.learning_rate)
                .n_episodes(n)
                .baseline(Baseline::MeanReturn);
            train(args, model, BatchedReinforce::<M::Params>::build(config)?)
        }
    }
}

fn run(args: &Args) -> Result<Vec<f64>> {
    match args.policy {
        PolicyKind::Uniform => {
            let model = UniformPolicy::build(UniformPolicyConfig::new(DIM_OBS, DIM_ACT))?;
            train(args, model, NoUpdate)
        }
        PolicyKind::Linear => {
            let model = LinearSoftmax::build(LinearSoftmaxConfig::new(DIM_OBS, DIM_ACT))?;
            train_with(args, model)
        }
        PolicyKind::Mlp => {
            let config = MlpConfig::new(DIM_OBS, vec![32], DIM_ACT).activation(Activation::Tanh);
            train_with(args, Mlp::build(config)?)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let performances = run(&args)?;

    let n = performances.len().min(100);
    if n > 0 {
        let tail = &performances[performances.len() - n..];
        info!(
            "{} episodes, mean performance of the last {}: {}",
            performances.len(),
            n,
            tail.iter().sum::<f64>() / n as f64
        );
    }

    Ok(())
}
