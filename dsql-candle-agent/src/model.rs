//! Interface of neural networks used as action-value functions.
use anyhow::Result;
use candle_nn::VarBuilder;

/// Neural network model not owing its [`VarMap`] internally.
///
/// [`VarMap`]: candle_nn::VarMap
pub trait SubModel1: Sized {
    /// Configuration from which [`SubModel1`] is constructed.
    type Config;

    /// Input of the [`SubModel1`].
    type Input;

    /// Output of the [`SubModel1`].
    type Output;

    /// Builds [`SubModel1`] with [`VarBuilder`] and [`SubModel1::Config`].
    fn build(vb: VarBuilder, config: Self::Config) -> Result<Self>;

    /// A generalized forward function.
    ///
    /// `train` enables training-only behaviors such as dropout.
    fn forward(&self, input: &Self::Input, train: bool) -> Result<Self::Output>;
}

/// Recurrent neural network model not owing its [`VarMap`] internally.
///
/// The difference from [`SubModel1`] is that the forward function carries a
/// hidden state from one step to the next.
///
/// [`VarMap`]: candle_nn::VarMap
pub trait RecurrentSubModel1: Sized {
    /// Configuration from which [`RecurrentSubModel1`] is constructed.
    type Config;

    /// Input of a single step.
    type Input;

    /// Hidden state carried between steps.
    type State;

    /// Output of a single step.
    type Output;

    /// Builds [`RecurrentSubModel1`].
    fn build(vb: VarBuilder, config: Self::Config) -> Result<Self>;

    /// Runs one step from `state`, returning the output and the next state.
    fn step(
        &self,
        input: &Self::Input,
        state: &Self::State,
        train: bool,
    ) -> Result<(Self::Output, Self::State)>;
}
