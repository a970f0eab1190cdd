//! Action-value networks owning their parameters.
mod base;
mod config;
mod recurrent;
mod value;
use anyhow::Result;
pub use base::QNet;
pub use config::QNetConfig;
pub use recurrent::RecurrentQNet;
pub use value::DiscreteActionValue;

/// A network that can serve as the lagged copy of another network.
pub trait TargetNetwork: Sized {
    /// Creates a network with the same architecture and a deep copy of the parameters.
    fn try_clone(&self) -> Result<Self>;

    /// Moves parameters towards those of `src`, `tau = 1` copies them.
    fn track_from(&mut self, src: &Self, tau: f64) -> Result<()>;
}
