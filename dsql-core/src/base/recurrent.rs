//! Forwarding of recurrent models.
use anyhow::Result;

/// Forwards a batch of inputs through a recurrent model with carried states.
///
/// Implementors take care of batching the inputs together with their hidden
/// states and return the outputs along with the updated states.
pub trait PackAndForward {
    /// Input of the model.
    type Input;

    /// Recurrent state carried between steps.
    type State;

    /// Output of the model.
    type Output;

    /// Runs the model on `input` starting from `state`.
    fn pack_and_forward(
        &self,
        input: &Self::Input,
        state: &Self::State,
    ) -> Result<(Self::Output, Self::State)>;
}
