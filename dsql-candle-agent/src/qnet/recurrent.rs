use super::{DiscreteActionValue, QNetConfig, TargetNetwork};
use crate::{model::RecurrentSubModel1, util::track};
use anyhow::{bail, Context, Result};
use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::{VarBuilder, VarMap};
use dsql_core::{ActionValueFunction, DsqlError, ModeSwitch, PackAndForward, TransitionBatch};
use log::trace;

/// Recurrent action-value network owning its parameters.
///
/// Inputs are either a batch of single steps, `(batch_size, ...)`, or a batch
/// of sequences, `(batch_size, seq_len, ...)`. Hidden states always have
/// `batch_size` rows.
pub struct RecurrentQNet<Q>
where
    Q: RecurrentSubModel1<Input = Tensor, State = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    device: Device,
    varmap: VarMap,
    q_config: Q::Config,
    q: Q,
    train: bool,
}

impl<Q> RecurrentQNet<Q>
where
    Q: RecurrentSubModel1<Input = Tensor, State = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    /// Constructs [`RecurrentQNet`].
    pub fn build(config: QNetConfig<Q::Config>) -> Result<Self> {
        let device = config.device.to_candle()?;
        let q_config = config.q_config.context("q_config is not set.")?;
        Self::build_on(q_config, device)
    }

    fn build_on(q_config: Q::Config, device: Device) -> Result<Self> {
        let varmap = VarMap::new();
        let q = {
            let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
            Q::build(vb, q_config.clone())?
        };

        Ok(Self {
            device,
            varmap,
            q_config,
            q,
            train: true,
        })
    }

    /// Returns the underlying recurrent model.
    pub fn model(&self) -> &Q {
        &self.q
    }

    pub fn get_varmap(&self) -> &VarMap {
        &self.varmap
    }
}

impl<Q> PackAndForward for RecurrentQNet<Q>
where
    Q: RecurrentSubModel1<Input = Tensor, State = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    type Input = Tensor;
    type State = Tensor;
    type Output = DiscreteActionValue;

    /// Runs the model from `state`.
    ///
    /// For sequence inputs, the action values of all steps are returned with
    /// shape `(batch_size * seq_len, n_actions)`, ordered batch-major, together
    /// with the hidden state after the last step.
    fn pack_and_forward(
        &self,
        input: &Tensor,
        state: &Tensor,
    ) -> Result<(DiscreteActionValue, Tensor)> {
        let input = input.to_device(&self.device)?;
        let state = state.to_device(&self.device)?;
        let batch_size = input.dims().first().copied().unwrap_or(0);
        if state.dims().first().copied().unwrap_or(0) != batch_size {
            bail!(
                "Recurrent state has shape {:?}, expected {} rows",
                state.dims(),
                batch_size
            );
        }

        match input.rank() {
            2 => {
                let (q, state) = self.q.step(&input, &state, self.train)?;
                Ok((DiscreteActionValue::new(q)?, state))
            }
            3 => {
                let seq_len = input.dims()[1];
                trace!("Unroll {} steps for {} sequences", seq_len, batch_size);
                let mut state = state;
                let mut qs = Vec::with_capacity(seq_len);
                for t in 0..seq_len {
                    let x_t = input.i((.., t))?.contiguous()?;
                    let (q, next_state) = self.q.step(&x_t, &state, self.train)?;
                    qs.push(q);
                    state = next_state;
                }
                let n_actions = qs.first().map(|q| q.dims()[1]).unwrap_or(0);
                let q = Tensor::stack(&qs, 1)?.reshape((batch_size * seq_len, n_actions))?;
                Ok((DiscreteActionValue::new(q)?, state))
            }
            r => bail!("Unsupported input rank {} for recurrent forward", r),
        }
    }
}

impl<Q> TargetNetwork for RecurrentQNet<Q>
where
    Q: RecurrentSubModel1<Input = Tensor, State = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    fn try_clone(&self) -> Result<Self> {
        let mut qnet = Self::build_on(self.q_config.clone(), self.device.clone())?;
        qnet.train = self.train;
        track(&qnet.varmap, &self.varmap, 1.0)?;
        Ok(qnet)
    }

    fn track_from(&mut self, src: &Self, tau: f64) -> Result<()> {
        track(&self.varmap, &src.varmap, tau)
    }
}

impl<Q> ModeSwitch for RecurrentQNet<Q>
where
    Q: RecurrentSubModel1<Input = Tensor, State = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }
}

impl<Q, B> ActionValueFunction<B> for RecurrentQNet<Q>
where
    Q: RecurrentSubModel1<Input = Tensor, State = Tensor, Output = Tensor>,
    Q::Config: Clone,
    B: TransitionBatch,
    B::ObsBatch: AsRef<Tensor>,
    B::RecurrentState: AsRef<Tensor>,
{
    type Output = DiscreteActionValue;

    fn next_action_values(&self, batch: &B) -> Result<DiscreteActionValue> {
        let state = batch
            .next_recurrent_state()
            .ok_or(DsqlError::MissingRecurrentState)?;
        let (qout, _) = self.pack_and_forward(batch.next_obs().as_ref(), state.as_ref())?;
        Ok(qout)
    }
}

#[cfg(test)]
mod test {
    use super::RecurrentQNet;
    use crate::{
        gru::{GruQ, GruQConfig},
        QNetConfig, TensorBatch,
    };
    use anyhow::Result;
    use candle_core::{DType, Device, IndexOp, Tensor};
    use dsql_core::{ActionValueFunction, DsqlError, GenericTransitionBatch, PackAndForward};

    fn qnet() -> Result<RecurrentQNet<GruQ>> {
        RecurrentQNet::build(QNetConfig::default().q_config(GruQConfig::new(3, 5, 2)))
    }

    #[test]
    fn test_single_step() -> Result<()> {
        let qnet = qnet()?;
        let xs = Tensor::randn(0f32, 1.0, (4, 3), &Device::Cpu)?;
        let h = qnet.model().zero_state(4)?;
        let (qout, h) = qnet.pack_and_forward(&xs, &h)?;

        assert_eq!(qout.q_values().dims(), &[4, 2]);
        assert_eq!(h.dims(), &[4, 5]);
        Ok(())
    }

    #[test]
    fn test_sequence_matches_steps() -> Result<()> {
        let qnet = qnet()?;
        let xs = Tensor::randn(0f32, 1.0, (2, 3, 3), &Device::Cpu)?;
        let h0 = qnet.model().zero_state(2)?;
        let (qout, h) = qnet.pack_and_forward(&xs, &h0)?;
        assert_eq!(qout.q_values().dims(), &[6, 2]);

        let mut h_ = h0;
        let mut last = None;
        for t in 0..3 {
            let x_t = xs.i((.., t))?.contiguous()?;
            let (q, next) = qnet.pack_and_forward(&x_t, &h_)?;
            h_ = next;
            last = Some(q);
        }
        let last: Vec<Vec<f32>> = last.unwrap().q_values().to_vec2()?;
        let q: Vec<Vec<f32>> = qout.q_values().to_vec2()?;
        // Rows 2 and 5 are the last steps of the two sequences
        for (a, b) in q[2].iter().chain(q[5].iter()).zip(last.iter().flatten()) {
            assert!((a - b).abs() < 1e-6);
        }
        let diff = (h - h_)?.abs()?.max_all()?.to_scalar::<f32>()?;
        assert!(diff < 1e-6);
        Ok(())
    }

    #[test]
    fn test_state_changes_output() -> Result<()> {
        let qnet = qnet()?;
        let xs = Tensor::ones((1, 3), DType::F32, &Device::Cpu)?;
        let h0 = Tensor::zeros((1, 5), DType::F32, &Device::Cpu)?;
        let h1 = Tensor::ones((1, 5), DType::F32, &Device::Cpu)?;
        let (q0, _) = qnet.pack_and_forward(&xs, &h0)?;
        let (q1, _) = qnet.pack_and_forward(&xs, &h1)?;

        let q0: Vec<Vec<f32>> = q0.q_values().to_vec2()?;
        let q1: Vec<Vec<f32>> = q1.q_values().to_vec2()?;
        assert_ne!(q0, q1);
        Ok(())
    }

    #[test]
    fn test_missing_recurrent_state() -> Result<()> {
        let qnet = qnet()?;
        let next_obs = TensorBatch::from_tensor(Tensor::zeros((2, 3), DType::F32, &Device::Cpu)?);
        let batch = GenericTransitionBatch::<TensorBatch, TensorBatch>::with_discount_factor(
            next_obs,
            vec![0.0, 0.0],
            vec![0, 0],
            0.99,
        )?;
        let err = qnet.next_action_values(&batch).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DsqlError>(),
            Some(&DsqlError::MissingRecurrentState)
        );
        Ok(())
    }

    #[test]
    fn test_state_rows_must_match() -> Result<()> {
        let qnet = qnet()?;
        let xs = Tensor::zeros((3, 3), DType::F32, &Device::Cpu)?;
        let h = qnet.model().zero_state(2)?;
        assert!(qnet.pack_and_forward(&xs, &h).is_err());
        Ok(())
    }
}
