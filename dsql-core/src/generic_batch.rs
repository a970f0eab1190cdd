//! Generic implementation of transition batches.
use crate::{BatchBase, DsqlError, TransitionBatch};
use anyhow::Result;

/// A batch of transitions with arbitrary observation and recurrent state types.
///
/// All fields share the same leading dimension, which is checked when the
/// batch is constructed.
///
/// # Type Parameters
///
/// * `O` - Observation batch
/// * `S` - Recurrent state batch, unused by feed-forward models
#[derive(Clone, Debug)]
pub struct GenericTransitionBatch<O, S>
where
    O: BatchBase,
    S: BatchBase,
{
    /// Next state observations
    pub next_obs: O,

    /// Recurrent states carried into the next observations
    pub next_recurrent_state: Option<S>,

    /// Transition rewards
    pub reward: Vec<f32>,

    /// Episode termination flags
    pub is_terminated: Vec<i8>,

    /// Discount applied to the bootstrapped value
    pub discount: Vec<f32>,
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(DsqlError::BatchSizeMismatch {
            field,
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}

impl<O, S> GenericTransitionBatch<O, S>
where
    O: BatchBase,
    S: BatchBase,
{
    /// Creates a batch, checking that all fields have the length of `reward`.
    pub fn new(
        next_obs: O,
        reward: Vec<f32>,
        is_terminated: Vec<i8>,
        discount: Vec<f32>,
    ) -> Result<Self> {
        let n = reward.len();
        check_len("next_obs", n, next_obs.len())?;
        check_len("is_terminated", n, is_terminated.len())?;
        check_len("discount", n, discount.len())?;

        Ok(Self {
            next_obs,
            next_recurrent_state: None,
            reward,
            is_terminated,
            discount,
        })
    }

    /// Creates a batch with the same discount factor for all transitions.
    pub fn with_discount_factor(
        next_obs: O,
        reward: Vec<f32>,
        is_terminated: Vec<i8>,
        discount_factor: f32,
    ) -> Result<Self> {
        let discount = vec![discount_factor; reward.len()];
        Self::new(next_obs, reward, is_terminated, discount)
    }

    /// Attaches the recurrent states carried into the next observations.
    pub fn with_recurrent_state(mut self, state: S) -> Result<Self> {
        check_len("next_recurrent_state", self.reward.len(), state.len())?;
        self.next_recurrent_state = Some(state);
        Ok(self)
    }

    /// Returns the transitions at `ixs`, in the order of `ixs`.
    pub fn sample(&self, ixs: &[usize]) -> Result<Self> {
        let next_recurrent_state = match &self.next_recurrent_state {
            Some(state) => Some(state.sample(ixs)?),
            None => None,
        };

        Ok(Self {
            next_obs: self.next_obs.sample(ixs)?,
            next_recurrent_state,
            reward: ixs.iter().map(|&i| self.reward[i]).collect(),
            is_terminated: ixs.iter().map(|&i| self.is_terminated[i]).collect(),
            discount: ixs.iter().map(|&i| self.discount[i]).collect(),
        })
    }
}

impl<O, S> TransitionBatch for GenericTransitionBatch<O, S>
where
    O: BatchBase,
    S: BatchBase,
{
    type ObsBatch = O;
    type RecurrentState = S;

    fn len(&self) -> usize {
        self.reward.len()
    }

    fn next_obs(&self) -> &Self::ObsBatch {
        &self.next_obs
    }

    fn next_recurrent_state(&self) -> Option<&Self::RecurrentState> {
        self.next_recurrent_state.as_ref()
    }

    fn reward(&self) -> &[f32] {
        &self.reward
    }

    fn is_terminated(&self) -> &[i8] {
        &self.is_terminated
    }

    fn discount(&self) -> &[f32] {
        &self.discount
    }
}
