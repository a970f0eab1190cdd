//! Targets of DQN and Double DQN.
use crate::{util::bellman_target, DiscreteActionValue};
use anyhow::Result;
use candle_core::Tensor;
use dsql_core::{ActionValueFunction, Evaluating, TargetValues, TransitionBatch};

/// DQN target, `y = r + discount * (1 - is_terminated) * max_a Q_tgt(s', a)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DqnTarget;

impl<Q, B> TargetValues<Q, B> for DqnTarget
where
    B: TransitionBatch,
    Q: ActionValueFunction<B, Output = DiscreteActionValue>,
{
    type Target = Tensor;

    fn compute_target_values(&self, _qnet: &mut Q, qnet_tgt: &mut Q, batch: &B) -> Result<Tensor> {
        let target_next_qout = {
            let qnet_tgt = Evaluating::new(qnet_tgt);
            qnet_tgt.next_action_values(batch)?
        };

        bellman_target(batch, &target_next_qout.max_values()?)
    }
}

/// Double DQN target.
///
/// The live network selects the action and the target network evaluates it,
/// `y = r + discount * (1 - is_terminated) * Q_tgt(s', argmax_a Q(s', a))`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoubleDqnTarget;

impl<Q, B> TargetValues<Q, B> for DoubleDqnTarget
where
    B: TransitionBatch,
    Q: ActionValueFunction<B, Output = DiscreteActionValue>,
{
    type Target = Tensor;

    fn compute_target_values(&self, qnet: &mut Q, qnet_tgt: &mut Q, batch: &B) -> Result<Tensor> {
        let next_action = {
            let qnet = Evaluating::new(qnet);
            qnet.next_action_values(batch)?.greedy_actions()?
        };

        let target_next_qout = {
            let qnet_tgt = Evaluating::new(qnet_tgt);
            qnet_tgt.next_action_values(batch)?
        };

        bellman_target(batch, &target_next_qout.evaluate_actions(&next_action)?)
    }
}
