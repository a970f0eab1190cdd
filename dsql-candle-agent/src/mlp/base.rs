use super::{mlp_forward, MlpConfig};
use crate::model::SubModel1;
use anyhow::{ensure, Result};
use candle_core::{Device, Tensor};
use candle_nn::{linear, Dropout, Linear, VarBuilder};

/// Returns vector of linear modules from [`MlpConfig`].
fn create_linear_layers(prefix: &str, vs: VarBuilder, config: &MlpConfig) -> Result<Vec<Linear>> {
    let mut dims = vec![config.in_dim];
    dims.extend(config.units.iter().copied());
    dims.push(config.out_dim);
    let vs = vs.pp(prefix);

    dims.windows(2)
        .enumerate()
        .map(|(i, w)| -> Result<Linear> { Ok(linear(w[0], w[1], vs.pp(format!("ln{}", i)))?) })
        .collect()
}

/// Multilayer perceptron with ReLU activation function.
///
/// Used as an action-value function, `out_dim` is the number of actions.
pub struct Mlp {
    config: MlpConfig,
    device: Device,
    layers: Vec<Linear>,
    dropout: Option<Dropout>,
}

impl SubModel1 for Mlp {
    type Config = MlpConfig;
    type Input = Tensor;
    type Output = Tensor;

    fn forward(&self, xs: &Self::Input, train: bool) -> Result<Tensor> {
        let xs = xs.to_device(&self.device)?;
        let xs = mlp_forward(xs, &self.layers, self.dropout.as_ref(), train)?;

        match self.config.activation_out {
            false => Ok(xs),
            true => Ok(xs.relu()?),
        }
    }

    fn build(vs: VarBuilder, config: Self::Config) -> Result<Self> {
        if let Some(p) = config.dropout {
            ensure!((0.0..1.0).contains(&p), "dropout must be in [0, 1), got {}", p);
        }
        let device = vs.device().clone();
        let layers = create_linear_layers("mlp", vs, &config)?;
        let dropout = config.dropout.map(Dropout::new);

        Ok(Mlp {
            config,
            device,
            layers,
            dropout,
        })
    }
}
