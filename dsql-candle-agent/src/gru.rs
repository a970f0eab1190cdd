//! Recurrent action-value function with a GRU cell.
use crate::model::RecurrentSubModel1;
use anyhow::Result;
use candle_core::{DType, Device, Tensor};
use candle_nn::{
    gru, linear,
    rnn::{GRUState, RNN},
    GRUConfig, Linear, Module, VarBuilder, GRU,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`GruQ`].
pub struct GruQConfig {
    in_dim: usize,
    hidden_dim: usize,
    out_dim: usize,
}

impl GruQConfig {
    /// Creates configuration of [`GruQ`].
    pub fn new(in_dim: usize, hidden_dim: usize, out_dim: usize) -> Self {
        Self {
            in_dim,
            hidden_dim,
            out_dim,
        }
    }
}

/// GRU cell followed by a linear head producing action values.
///
/// The hidden state has shape `(batch_size, hidden_dim)`.
pub struct GruQ {
    device: Device,
    hidden_dim: usize,
    gru: GRU,
    head: Linear,
}

impl GruQ {
    /// Returns the zero hidden state for `batch_size` transitions.
    pub fn zero_state(&self, batch_size: usize) -> Result<Tensor> {
        Ok(Tensor::zeros(
            (batch_size, self.hidden_dim),
            DType::F32,
            &self.device,
        )?)
    }
}

impl RecurrentSubModel1 for GruQ {
    type Config = GruQConfig;
    type Input = Tensor;
    type State = Tensor;
    type Output = Tensor;

    fn build(vb: VarBuilder, config: Self::Config) -> Result<Self> {
        let device = vb.device().clone();
        let gru = gru(
            config.in_dim,
            config.hidden_dim,
            GRUConfig::default(),
            vb.pp("gru"),
        )?;
        let head = linear(config.hidden_dim, config.out_dim, vb.pp("head"))?;

        Ok(Self {
            device,
            hidden_dim: config.hidden_dim,
            gru,
            head,
        })
    }

    fn step(&self, input: &Tensor, state: &Tensor, _train: bool) -> Result<(Tensor, Tensor)> {
        let input = input.to_device(&self.device)?;
        let state = GRUState {
            h: state.to_device(&self.device)?,
        };
        let h = self.gru.step(&input, &state)?.h;
        let q = self.head.forward(&h)?;
        Ok((q, h))
    }
}
