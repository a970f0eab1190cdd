use crate::Device;
use anyhow::Result;
use log::info;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`QNet`](super::QNet) and [`RecurrentQNet`](super::RecurrentQNet).
pub struct QNetConfig<Q> {
    pub(super) q_config: Option<Q>,
    #[serde(default)]
    pub(super) device: Device,
}

impl<Q> Default for QNetConfig<Q> {
    fn default() -> Self {
        Self {
            q_config: None,
            device: Device::Cpu,
        }
    }
}

impl<Q> QNetConfig<Q>
where
    Q: DeserializeOwned + Serialize,
{
    /// Sets configurations for action-value function.
    pub fn q_config(mut self, v: Q) -> Self {
        self.q_config = Some(v);
        self
    }

    /// Sets the device on which parameters are allocated.
    pub fn device(mut self, v: Device) -> Self {
        self.device = v;
        self
    }

    /// Constructs [`QNetConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of Q-network from {:?}", path_);
        Ok(b)
    }

    /// Saves [`QNetConfig`] to as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of Q-network into {:?}", path_);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::QNetConfig;
    use crate::{gru::GruQConfig, mlp::MlpConfig, Device};
    use anyhow::Result;
    use tempdir::TempDir;

    #[test]
    fn test_serde_roundtrip() -> Result<()> {
        let config = QNetConfig::default()
            .q_config(MlpConfig::new(4, vec![64, 64], 2, false).dropout(0.25))
            .device(Device::Cuda(1));
        let dir = TempDir::new("qnet_config")?;
        let path = dir.path().join("qnet.yaml");
        config.save(&path)?;
        assert_eq!(QNetConfig::<MlpConfig>::load(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_recurrent_serde_roundtrip() -> Result<()> {
        let config = QNetConfig::default().q_config(GruQConfig::new(3, 16, 4));
        let dir = TempDir::new("qnet_config")?;
        let path = dir.path().join("gru_qnet.yaml");
        config.save(&path)?;
        let loaded = QNetConfig::<GruQConfig>::load(&path)?;
        assert_eq!(loaded, config);
        assert_eq!(loaded.device, Device::Cpu);
        Ok(())
    }
}
