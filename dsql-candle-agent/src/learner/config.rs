//! Configuration of [`QLearner`](super::QLearner).
use crate::{DoubleSqlConfig, TargetValuesConfig};
use anyhow::Result;
use dsql_core::DsqlError;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Constructs [`QLearner`](super::QLearner).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct QLearnerConfig {
    pub(super) target: TargetValuesConfig,
    pub(super) discount_factor: f64,
    pub(super) target_update_interval: usize,
    pub(super) tau: f64,
}

impl Default for QLearnerConfig {
    fn default() -> Self {
        Self {
            target: TargetValuesConfig::default(),
            discount_factor: 0.99,
            target_update_interval: 1,
            tau: 0.005,
        }
    }
}

impl QLearnerConfig {
    /// Sets the target-value strategy.
    pub fn target(mut self, v: TargetValuesConfig) -> Self {
        self.target = v;
        self
    }

    /// Uses double soft Q-learning with temperature `alpha`.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.target = TargetValuesConfig::DoubleSql(DoubleSqlConfig::default().alpha(alpha));
        self
    }

    /// Discount factor of one-step transitions.
    ///
    /// Targets use the per-transition discounts stored in each batch, so this
    /// value is only read back through
    /// [`QLearner::discount_factor`](super::QLearner::discount_factor) when the
    /// training loop builds its batches.
    pub fn discount_factor(mut self, v: f64) -> Self {
        self.discount_factor = v;
        self
    }

    /// Number of optimization steps between target network updates.
    pub fn target_update_interval(mut self, v: usize) -> Self {
        self.target_update_interval = v;
        self
    }

    /// Soft update coefficient, `1.0` copies the live network.
    pub fn tau(mut self, v: f64) -> Self {
        self.tau = v;
        self
    }

    pub(super) fn check(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(DsqlError::InvalidConfig(format!(
                "discount_factor must be in [0, 1], got {}",
                self.discount_factor
            ))
            .into());
        }
        if self.target_update_interval == 0 {
            return Err(
                DsqlError::InvalidConfig("target_update_interval must be positive".into()).into(),
            );
        }
        if !(self.tau > 0.0 && self.tau <= 1.0) {
            return Err(
                DsqlError::InvalidConfig(format!("tau must be in (0, 1], got {}", self.tau)).into(),
            );
        }
        Ok(())
    }

    /// Loads [`QLearnerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of QLearner from {:?}", path_);
        Ok(b)
    }

    /// Saves [`QLearnerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of QLearner into {:?}", path_);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::QLearnerConfig;
    use crate::{DoubleSqlConfig, TargetValuesConfig};
    use anyhow::Result;
    use tempdir::TempDir;

    #[test]
    fn test_check() {
        assert!(QLearnerConfig::default().check().is_ok());
        assert!(QLearnerConfig::default().discount_factor(1.5).check().is_err());
        assert!(QLearnerConfig::default().target_update_interval(0).check().is_err());
        assert!(QLearnerConfig::default().tau(0.0).check().is_err());
        assert!(QLearnerConfig::default().tau(1.0).check().is_ok());
    }

    #[test]
    fn test_alpha_selects_double_sql() {
        let config = QLearnerConfig::default().target(TargetValuesConfig::Dqn).alpha(2.0);
        assert_eq!(
            config.target,
            TargetValuesConfig::DoubleSql(DoubleSqlConfig::default().alpha(2.0))
        );
    }

    #[test]
    fn test_serde_roundtrip() -> Result<()> {
        let config = QLearnerConfig::default()
            .alpha(0.3)
            .discount_factor(0.9)
            .target_update_interval(100)
            .tau(1.0);
        let dir = TempDir::new("q_learner_config")?;
        let path = dir.path().join("q_learner.yaml");
        config.save(&path)?;
        assert_eq!(QLearnerConfig::load(&path)?, config);
        Ok(())
    }
}
