//! Learner holding a live network, its target network and a target-value strategy.
mod base;
mod config;
pub use base::QLearner;
pub use config::QLearnerConfig;
