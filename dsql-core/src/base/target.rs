//! Target-value strategies.
use super::{ModeSwitch, TransitionBatch};
use anyhow::Result;

/// An action-value function evaluated at the next observations of a batch.
///
/// Recurrent implementations start from the batch's
/// [`next_recurrent_state`](TransitionBatch::next_recurrent_state).
pub trait ActionValueFunction<B: TransitionBatch>: ModeSwitch {
    /// Action values for every transition in the batch.
    type Output;

    /// Evaluates the function at `o_t+1`.
    fn next_action_values(&self, batch: &B) -> Result<Self::Output>;
}

/// Computes the regression targets of an action-value function.
///
/// A learner holds one strategy and invokes it once per optimization step.
/// Both networks are borrowed mutably only to switch them into evaluation
/// mode; their parameters are left untouched.
pub trait TargetValues<Q, B>
where
    B: TransitionBatch,
    Q: ActionValueFunction<B>,
{
    /// Per-transition targets.
    type Target;

    /// Computes one target for every transition in `batch`.
    ///
    /// `qnet` is the live network and `qnet_tgt` is its lagged copy.
    fn compute_target_values(&self, qnet: &mut Q, qnet_tgt: &mut Q, batch: &B)
        -> Result<Self::Target>;
}
