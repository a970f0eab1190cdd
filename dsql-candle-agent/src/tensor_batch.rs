use anyhow::Result;
use candle_core::Tensor;
use dsql_core::BatchBase;

/// A batch consisting of a [`Tensor`] whose first axis is the batch axis.
///
/// Used for next observations and recurrent states of a
/// [`GenericTransitionBatch`](dsql_core::GenericTransitionBatch).
#[derive(Clone, Debug)]
pub struct TensorBatch {
    buf: Tensor,
}

impl TensorBatch {
    pub fn from_tensor(t: Tensor) -> Self {
        Self { buf: t }
    }
}

impl BatchBase for TensorBatch {
    fn len(&self) -> usize {
        self.buf.dims().first().copied().unwrap_or(0)
    }

    fn sample(&self, ixs: &[usize]) -> Result<Self> {
        let ixs = {
            let device = self.buf.device();
            let n = ixs.len();
            let ixs = ixs.iter().map(|x| *x as u32).collect::<Vec<_>>();
            Tensor::from_vec(ixs, (n,), device)?
        };
        Ok(Self {
            buf: self.buf.index_select(&ixs, 0)?,
        })
    }
}

impl AsRef<Tensor> for TensorBatch {
    fn as_ref(&self) -> &Tensor {
        &self.buf
    }
}

impl From<Tensor> for TensorBatch {
    fn from(t: Tensor) -> Self {
        Self::from_tensor(t)
    }
}

impl From<TensorBatch> for Tensor {
    fn from(b: TensorBatch) -> Self {
        b.buf
    }
}
