//! Multilayer perceptron.
mod base;
mod config;
use anyhow::Result;
pub use base::Mlp;
use candle_core::Tensor;
use candle_nn::{Dropout, Linear, Module};
pub use config::MlpConfig;

fn mlp_forward(
    xs: Tensor,
    layers: &[Linear],
    dropout: Option<&Dropout>,
    train: bool,
) -> Result<Tensor> {
    let n_layers = layers.len();
    let mut xs = xs;

    for layer in &layers[..n_layers - 1] {
        xs = layer.forward(&xs)?.relu()?;
        if let Some(dropout) = dropout {
            xs = dropout.forward(&xs, train)?;
        }
    }

    Ok(layers[n_layers - 1].forward(&xs)?)
}
