//! Environments implemented natively in Rust.
//!
//! * [`CartPole`]: the classic pole-balancing control task.
//! * [`RewardChain`]: a small synthetic chain where one action is always
//!   rewarded, useful to check that an agent learns at all.
//!
//! Both use [`VecObs`] as observation and [`DiscreteAct`] as action.
mod act;
mod cart_pole;
mod obs;
mod reward_chain;
pub use act::DiscreteAct;
pub use cart_pole::{CartPole, CartPoleConfig};
pub use obs::VecObs;
pub use reward_chain::{RewardChain, RewardChainConfig};
