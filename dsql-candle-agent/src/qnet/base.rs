use super::{DiscreteActionValue, QNetConfig, TargetNetwork};
use crate::{model::SubModel1, util::track};
use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use dsql_core::{ActionValueFunction, ModeSwitch, TransitionBatch};

/// Action-value network owning its parameters.
///
/// The network starts in training mode. Wrap it with
/// [`Evaluating`](dsql_core::Evaluating) to run it in inference mode.
pub struct QNet<Q>
where
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    device: Device,
    varmap: VarMap,
    q_config: Q::Config,
    q: Q,
    train: bool,
}

impl<Q> QNet<Q>
where
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    /// Constructs [`QNet`].
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

    /// Outputs the action-value given observation(s).
    pub fn forward(&self, obs: &Tensor) -> Result<DiscreteActionValue> {
        DiscreteActionValue::new(self.q.forward(obs, self.train)?)
    }

    pub fn get_varmap(&self) -> &VarMap {
        &self.varmap
    }
}

impl<Q> TargetNetwork for QNet<Q>
where
    Q: SubModel1<Input = Tensor, Output = Tensor>,
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

impl<Q> ModeSwitch for QNet<Q>
where
    Q: SubModel1<Input = Tensor, Output = Tensor>,
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

impl<Q, B> ActionValueFunction<B> for QNet<Q>
where
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: Clone,
    B: TransitionBatch,
    B::ObsBatch: AsRef<Tensor>,
{
    type Output = DiscreteActionValue;

    fn next_action_values(&self, batch: &B) -> Result<DiscreteActionValue> {
        self.forward(batch.next_obs().as_ref())
    }
}
