//! Double soft Q-learning targets implemented with [candle](https://crates.io/crates/candle-core).
//!
//! The regression target of a transition is
//!
//! ```text
//! y = r + discount * (1 - is_terminated) * alpha * log(sum_a exp(Q_tgt(s', a) / alpha))
//! ```
//!
//! where `Q_tgt` is the target network. See [`DoubleSql`] for details and
//! [`TargetValuesConfig`] for the sibling DQN and Double DQN targets.
pub mod dqn;
pub mod dsql;
pub mod gru;
pub mod learner;
pub mod mlp;
pub mod model;
pub mod qnet;
pub mod target;
mod tensor_batch;
pub mod util;
use anyhow::Result;
pub use dsql::{soft_max_value, DoubleSql, DoubleSqlConfig};
pub use learner::{QLearner, QLearnerConfig};
pub use qnet::{DiscreteActionValue, QNet, QNetConfig, RecurrentQNet, TargetNetwork};
use serde::{Deserialize, Serialize};
pub use target::{TargetStrategy, TargetValuesConfig};
pub use tensor_batch::TensorBatch;

#[derive(Clone, Debug, Copy, Default, Deserialize, Serialize, PartialEq)]
/// Device for using candle.
///
/// This enum is added because [`candle_core::Device`] does not support serialization.
pub enum Device {
    /// The main CPU device.
    #[default]
    Cpu,

    /// The main GPU device.
    Cuda(usize),
}

impl Device {
    /// Creates the corresponding [`candle_core::Device`].
    pub fn to_candle(self) -> Result<candle_core::Device> {
        match self {
            Self::Cpu => Ok(candle_core::Device::Cpu),
            Self::Cuda(n) => Ok(candle_core::Device::new_cuda(n)?),
        }
    }
}
