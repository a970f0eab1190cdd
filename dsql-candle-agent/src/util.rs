//! Utilities.
use anyhow::{anyhow, Result};
use candle_core::Tensor;
use candle_nn::VarMap;
use dsql_core::TransitionBatch;
use log::trace;

/// Apply soft update on variables.
///
/// Variables are identified by their names.
///
/// dest = tau * src + (1.0 - tau) * dest
pub fn track(dest: &VarMap, src: &VarMap, tau: f64) -> Result<()> {
    trace!("dest");
    let dest = dest.data().lock().map_err(|e| anyhow!("{}", e))?;
    trace!("src");
    let src = src.data().lock().map_err(|e| anyhow!("{}", e))?;

    for (k_dest, v_dest) in dest.iter() {
        let v_src = src
            .get(k_dest)
            .ok_or_else(|| anyhow!("Variable {} not found in source", k_dest))?;
        let t_src = v_src.as_tensor();
        let t_dest = v_dest.as_tensor();
        let t_dest = ((tau * t_src)? + ((1.0 - tau) * t_dest)?)?;
        v_dest.set(&t_dest)?;
    }

    Ok(())
}

/// Combines bootstrapped values with the rewards of a batch.
///
/// `y_i = r_i + discount_i * next_q_i` for non-terminal transitions and
/// `y_i = r_i` for terminal ones. The result has the dtype and device of
/// `next_q` and is detached from the computation graph.
pub fn bellman_target<B: TransitionBatch>(batch: &B, next_q: &Tensor) -> Result<Tensor> {
    let n = batch.len();
    let device = next_q.device();
    let dtype = next_q.dtype();
    let reward = Tensor::from_slice(batch.reward(), (n,), device)?.to_dtype(dtype)?;
    let discount = Tensor::from_slice(batch.discount(), (n,), device)?.to_dtype(dtype)?;
    let is_terminated = {
        let v = batch
            .is_terminated()
            .iter()
            .map(|&v| (v != 0) as u8)
            .collect::<Vec<_>>();
        Tensor::from_slice(&v[..], (v.len(),), device)?
    };
    let bootstrapped = (&reward + (discount * next_q)?)?;

    // Terminal transitions take the reward as is, even for non-finite next_q
    Ok(is_terminated.where_cond(&reward, &bootstrapped)?.detach())
}
