//! Configuration of double soft Q-learning.
use super::DoubleSql;
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

fn default_alpha() -> f64 {
    1.0
}

/// Constructs [`DoubleSql`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct DoubleSqlConfig {
    /// Temperature of the soft-maximum operator.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for DoubleSqlConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
        }
    }
}

impl DoubleSqlConfig {
    /// Sets the temperature of the soft-maximum operator.
    pub fn alpha(mut self, v: f64) -> Self {
        self.alpha = v;
        self
    }

    /// Constructs [`DoubleSql`], failing if `alpha` is not positive.
    pub fn build(&self) -> Result<DoubleSql> {
        DoubleSql::new(self.alpha)
    }

    /// Loads [`DoubleSqlConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of DoubleSql from {:?}", path_);
        Ok(b)
    }

    /// Saves [`DoubleSqlConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of DoubleSql into {:?}", path_);
        Ok(())
    }
}
