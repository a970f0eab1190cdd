//! Selection of the target-value strategy.
use crate::{
    dqn::{DoubleDqnTarget, DqnTarget},
    DiscreteActionValue, DoubleSql, DoubleSqlConfig,
};
use anyhow::Result;
use candle_core::Tensor;
use dsql_core::{ActionValueFunction, TargetValues, TransitionBatch};
use serde::{Deserialize, Serialize};

/// Configuration of the target-value strategy of [`QLearner`](crate::QLearner).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum TargetValuesConfig {
    /// Maximum of the target network.
    Dqn,

    /// Target network evaluated at the greedy action of the live network.
    DoubleDqn,

    /// Soft maximum of the target network.
    DoubleSql(DoubleSqlConfig),
}

impl Default for TargetValuesConfig {
    fn default() -> Self {
        Self::DoubleSql(DoubleSqlConfig::default())
    }
}

impl TargetValuesConfig {
    /// Constructs the strategy.
    pub fn build(&self) -> Result<TargetStrategy> {
        Ok(match self {
            Self::Dqn => TargetStrategy::Dqn(DqnTarget),
            Self::DoubleDqn => TargetStrategy::DoubleDqn(DoubleDqnTarget),
            Self::DoubleSql(config) => TargetStrategy::DoubleSql(config.build()?),
        })
    }
}

/// Target-value strategy selected by [`TargetValuesConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum TargetStrategy {
    /// See [`DqnTarget`].
    Dqn(DqnTarget),

    /// See [`DoubleDqnTarget`].
    DoubleDqn(DoubleDqnTarget),

    /// See [`DoubleSql`].
    DoubleSql(DoubleSql),
}

impl<Q, B> TargetValues<Q, B> for TargetStrategy
where
    B: TransitionBatch,
    Q: ActionValueFunction<B, Output = DiscreteActionValue>,
{
    type Target = Tensor;

    fn compute_target_values(&self, qnet: &mut Q, qnet_tgt: &mut Q, batch: &B) -> Result<Tensor> {
        match self {
            Self::Dqn(s) => s.compute_target_values(qnet, qnet_tgt, batch),
            Self::DoubleDqn(s) => s.compute_target_values(qnet, qnet_tgt, batch),
            Self::DoubleSql(s) => s.compute_target_values(qnet, qnet_tgt, batch),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{TargetStrategy, TargetValuesConfig};
    use crate::DoubleSqlConfig;

    #[test]
    fn test_default_is_double_sql() {
        match TargetValuesConfig::default().build().unwrap() {
            TargetStrategy::DoubleSql(s) => assert_eq!(s.alpha(), 1.0),
            s => panic!("unexpected strategy {:?}", s),
        }
    }

    #[test]
    fn test_yaml() {
        let config: TargetValuesConfig = serde_yaml::from_str("DoubleSql:\n  alpha: 0.5\n").unwrap();
        assert_eq!(
            config,
            TargetValuesConfig::DoubleSql(DoubleSqlConfig::default().alpha(0.5))
        );
        let config: TargetValuesConfig = serde_yaml::from_str("DoubleDqn").unwrap();
        assert_eq!(config.build().unwrap(), TargetStrategy::DoubleDqn(Default::default()));
    }

    #[test]
    fn test_invalid_alpha() {
        let config = TargetValuesConfig::DoubleSql(DoubleSqlConfig::default().alpha(-0.5));
        assert!(config.build().is_err());
    }
}
