//! Batch.
use anyhow::Result;

/// Container of per-transition data sharing the leading batch dimension.
///
/// Observation batches and recurrent states implement this trait so that a
/// [`GenericTransitionBatch`](crate::GenericTransitionBatch) can validate its
/// length and select a subset of its transitions.
pub trait BatchBase: Sized {
    /// Returns the number of transitions in the container.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no transition.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the transitions at `ixs`, in the order of `ixs`.
    fn sample(&self, ixs: &[usize]) -> Result<Self>;
}

/// A batch of transitions used to compute regression targets.
///
/// Only the fields needed for bootstrapping are exposed: the next
/// observation, the optional recurrent state carried into it, the reward,
/// the terminal flag and the discount applied to the bootstrapped value.
pub trait TransitionBatch {
    /// A set of observations in a batch.
    type ObsBatch;

    /// A set of recurrent states in a batch.
    type RecurrentState;

    /// Returns the number of transitions.
    fn len(&self) -> usize;

    /// Returns `true` if the batch holds no transition.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `o_t+1`.
    fn next_obs(&self) -> &Self::ObsBatch;

    /// Returns the recurrent state carried into `o_t+1`, if any.
    fn next_recurrent_state(&self) -> Option<&Self::RecurrentState>;

    /// Returns `r_t`.
    fn reward(&self) -> &[f32];

    /// Returns `is_terminated_t` as 0/1 flags.
    fn is_terminated(&self) -> &[i8];

    /// Returns the discount of each transition, `gamma` or `gamma^n` for n-step returns.
    fn discount(&self) -> &[f32];
}
