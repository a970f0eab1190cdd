//! Learner computing regression targets of a Q-network.
use super::QLearnerConfig;
use crate::{DiscreteActionValue, TargetNetwork, TargetStrategy};
use anyhow::Result;
use candle_core::Tensor;
use dsql_core::{ActionValueFunction, TargetValues, TransitionBatch};
use log::{debug, info};

/// Holds a live Q-network, its lagged copy and the target-value strategy.
///
/// The training loop computes targets with [`QLearner::compute_target_values`],
/// performs its own optimization of the live network, then calls
/// [`QLearner::on_opt_step`] so that the target network follows the live one.
pub struct QLearner<N> {
    qnet: N,
    qnet_tgt: N,
    strategy: TargetStrategy,
    discount_factor: f64,
    target_update_interval: usize,
    target_update_counter: usize,
    tau: f64,
    n_opts: usize,
}

impl<N: TargetNetwork> QLearner<N> {
    /// Constructs [`QLearner`], initializing the target network as a copy of `qnet`.
    pub fn build(qnet: N, config: QLearnerConfig) -> Result<Self> {
        config.check()?;
        let strategy = config.target.build()?;
        let qnet_tgt = qnet.try_clone()?;
        info!("Build QLearner with {:?}", strategy);

        Ok(Self {
            qnet,
            qnet_tgt,
            strategy,
            discount_factor: config.discount_factor,
            target_update_interval: config.target_update_interval,
            target_update_counter: 0,
            tau: config.tau,
            n_opts: 0,
        })
    }

    /// Computes the regression targets of `batch`.
    pub fn compute_target_values<B>(&mut self, batch: &B) -> Result<Tensor>
    where
        B: TransitionBatch,
        N: ActionValueFunction<B, Output = DiscreteActionValue>,
    {
        self.strategy
            .compute_target_values(&mut self.qnet, &mut self.qnet_tgt, batch)
    }

    /// Counts an optimization step of the live network.
    ///
    /// Every `target_update_interval` steps the target network is moved
    /// towards the live network with coefficient `tau`. Returns `true` if the
    /// target network was updated.
    pub fn on_opt_step(&mut self) -> Result<bool> {
        self.n_opts += 1;
        self.target_update_counter += 1;
        if self.target_update_counter < self.target_update_interval {
            return Ok(false);
        }

        self.target_update_counter = 0;
        self.qnet_tgt.track_from(&self.qnet, self.tau)?;
        debug!("Update target network at opt step {}", self.n_opts);
        Ok(true)
    }

    pub fn qnet(&self) -> &N {
        &self.qnet
    }

    /// Returns the live network, e.g. for the optimizer of the training loop.
    pub fn qnet_mut(&mut self) -> &mut N {
        &mut self.qnet
    }

    pub fn qnet_tgt(&self) -> &N {
        &self.qnet_tgt
    }

    pub fn strategy(&self) -> &TargetStrategy {
        &self.strategy
    }

    /// Discount factor for constructing batches of one-step transitions,
    /// e.g. with [`GenericTransitionBatch::with_discount_factor`](dsql_core::GenericTransitionBatch::with_discount_factor).
    ///
    /// [`QLearner::compute_target_values`] does not apply it; the discounts of
    /// the batch are used as they are.
    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Returns the number of optimization steps counted so far.
    pub fn n_opts(&self) -> usize {
        self.n_opts
    }
}
