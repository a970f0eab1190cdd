//! Double soft Q-learning targets.
use super::soft_max_value;
use crate::{util::bellman_target, DiscreteActionValue};
use anyhow::Result;
use candle_core::Tensor;
use dsql_core::{ActionValueFunction, DsqlError, Evaluating, TargetValues, TransitionBatch};
use log::trace;

/// Double soft Q-learning.
///
/// The bootstrapped value of a next state is the soft maximum of the target
/// network's action values:
///
/// ```text
/// y = r + discount * (1 - is_terminated) * alpha * logsumexp(Q_tgt(s', .) / alpha)
/// ```
///
/// The live network is also evaluated at `s'` as in Double DQN, but its
/// output does not enter the target.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleSql {
    alpha: f64,
}

impl DoubleSql {
    /// Creates the strategy with temperature `alpha`, which must be positive and finite.
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(DsqlError::InvalidAlpha(alpha).into());
        }
        Ok(Self { alpha })
    }

    /// Returns the temperature of the soft-maximum operator.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Soft maximum of the action values of each state.
    pub fn l_operator(&self, qout: &DiscreteActionValue) -> Result<Tensor> {
        soft_max_value(qout.q_values(), self.alpha)
    }
}

impl<Q, B> TargetValues<Q, B> for DoubleSql
where
    B: TransitionBatch,
    Q: ActionValueFunction<B, Output = DiscreteActionValue>,
{
    type Target = Tensor;

    fn compute_target_values(&self, qnet: &mut Q, qnet_tgt: &mut Q, batch: &B) -> Result<Tensor> {
        let _next_qout = {
            let qnet = Evaluating::new(qnet);
            qnet.next_action_values(batch)?
        };

        let target_next_qout = {
            let qnet_tgt = Evaluating::new(qnet_tgt);
            qnet_tgt.next_action_values(batch)?
        };

        let next_q_expect = self.l_operator(&target_next_qout)?;
        trace!(
            "Soft values of {} next states with alpha = {}",
            target_next_qout.len(),
            self.alpha
        );

        bellman_target(batch, &next_q_expect)
    }
}
