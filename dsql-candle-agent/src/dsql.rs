//! Double soft Q-learning.
//!
//! See <https://arxiv.org/abs/1702.08165>.
mod base;
mod config;
mod operator;
pub use base::DoubleSql;
pub use config::DoubleSqlConfig;
pub use operator::soft_max_value;
