use anyhow::{ensure, Result};
use candle_core::{DType, Tensor, D};

/// Action values of a batch of states over a discrete action set.
///
/// The wrapped tensor has shape `(batch_size, n_actions)`.
#[derive(Clone, Debug)]
pub struct DiscreteActionValue {
    q_values: Tensor,
}

impl DiscreteActionValue {
    /// Wraps a `(batch_size, n_actions)` tensor.
    pub fn new(q_values: Tensor) -> Result<Self> {
        ensure!(
            q_values.rank() == 2,
            "Action values must have shape (batch_size, n_actions), got {:?}",
            q_values.dims()
        );
        Ok(Self { q_values })
    }

    /// Returns the raw action values.
    pub fn q_values(&self) -> &Tensor {
        &self.q_values
    }

    /// Returns the number of states.
    pub fn len(&self) -> usize {
        self.q_values.dims()[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of actions.
    pub fn n_actions(&self) -> usize {
        self.q_values.dims()[1]
    }

    /// Returns the greedy action of each state as an `i64` tensor.
    pub fn greedy_actions(&self) -> Result<Tensor> {
        Ok(self.q_values.argmax(D::Minus1)?.to_dtype(DType::I64)?)
    }

    /// Returns the maximum action value of each state.
    pub fn max_values(&self) -> Result<Tensor> {
        Ok(self.q_values.max(D::Minus1)?)
    }

    /// Returns the value of `actions[i]` in state `i`.
    pub fn evaluate_actions(&self, actions: &Tensor) -> Result<Tensor> {
        let actions = actions
            .to_device(self.q_values.device())?
            .to_dtype(DType::I64)?
            .unsqueeze(D::Minus1)?;
        Ok(self
            .q_values
            .gather(&actions, D::Minus1)?
            .squeeze(D::Minus1)?)
    }
}

#[cfg(test)]
mod test {
    use super::DiscreteActionValue;
    use anyhow::Result;
    use candle_core::{Device, Tensor};

    #[test]
    fn test_greedy_and_max() -> Result<()> {
        let q = Tensor::new(&[[1f32, 3.0, 2.0], [0.5, -1.0, 0.0]], &Device::Cpu)?;
        let qout = DiscreteActionValue::new(q)?;

        assert_eq!(qout.len(), 2);
        assert_eq!(qout.n_actions(), 3);
        assert_eq!(qout.greedy_actions()?.to_vec1::<i64>()?, vec![1, 0]);
        assert_eq!(qout.max_values()?.to_vec1::<f32>()?, vec![3.0, 0.5]);
        Ok(())
    }

    #[test]
    fn test_evaluate_actions() -> Result<()> {
        let q = Tensor::new(&[[1f32, 3.0, 2.0], [0.5, -1.0, 0.0]], &Device::Cpu)?;
        let qout = DiscreteActionValue::new(q)?;
        let actions = Tensor::new(&[2i64, 1], &Device::Cpu)?;

        assert_eq!(qout.evaluate_actions(&actions)?.to_vec1::<f32>()?, vec![2.0, -1.0]);
        Ok(())
    }

    #[test]
    fn test_rejects_rank_1() -> Result<()> {
        let q = Tensor::new(&[1f32, 3.0], &Device::Cpu)?;
        assert!(DiscreteActionValue::new(q).is_err());
        Ok(())
    }
}
