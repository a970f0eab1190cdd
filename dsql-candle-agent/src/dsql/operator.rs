use anyhow::{bail, Result};
use candle_core::{Tensor, D};

/// Soft maximum of action values with temperature `alpha`.
///
/// For `q` of shape `(batch_size, n_actions)`, returns a tensor of shape
/// `(batch_size,)` with
///
/// ```text
/// alpha * log(sum_a exp(q[i, a] / alpha))
/// ```
///
/// The maximum of each row is subtracted before exponentiation, so large
/// action values do not overflow. A 1-D `q` is treated as a single row and
/// an empty batch gives an empty result.
///
/// `alpha` must be positive; it is not checked here.
pub fn soft_max_value(q: &Tensor, alpha: f64) -> Result<Tensor> {
    match q.rank() {
        1 => soft_max_value(&q.unsqueeze(0)?, alpha),
        2 => {
            if q.dims()[0] == 0 {
                return Ok(Tensor::zeros((0,), q.dtype(), q.device())?);
            }
            let scaled = q.affine(1.0 / alpha, 0.0)?;
            let m = scaled.max_keepdim(D::Minus1)?;
            // An infinite row max would give inf - inf in the shift
            let m = m.abs()?.lt(f64::INFINITY)?.where_cond(&m, &m.zeros_like()?)?;
            let lse = scaled
                .broadcast_sub(&m)?
                .exp()?
                .sum_keepdim(D::Minus1)?
                .log()?;
            Ok((lse + m)?.squeeze(D::Minus1)?.affine(alpha, 0.0)?)
        }
        r => bail!("Action values must be 1-D or 2-D, got rank {}", r),
    }
}

#[cfg(test)]
mod test {
    use super::soft_max_value;
    use anyhow::Result;
    use candle_core::{DType, Device, Tensor};

    fn soft_max(q: &[f64], alpha: f64) -> Result<f64> {
        let q = Tensor::from_slice(q, (1, q.len()), &Device::Cpu)?;
        Ok(soft_max_value(&q, alpha)?.to_vec1::<f64>()?[0])
    }

    fn random_q(rng: &fastrand::Rng, n: usize) -> Vec<f64> {
        (0..n).map(|_| 10.0 * (rng.f64() - 0.5)).collect()
    }

    #[test]
    fn test_equal_entries() -> Result<()> {
        for &alpha in &[0.01, 0.5, 1.0, 3.0] {
            for &n in &[1usize, 2, 5] {
                let c = -1.5;
                let v = soft_max(&vec![c; n], alpha)?;
                assert!((v - (c + alpha * (n as f64).ln())).abs() < 1e-12);
            }
        }
        Ok(())
    }

    #[test]
    fn test_converges_to_max() -> Result<()> {
        let rng = fastrand::Rng::with_seed(42);
        for _ in 0..20 {
            let q = random_q(&rng, 4);
            let max = q.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let v = soft_max(&q, 1e-4)?;
            assert!((v - max).abs() <= 1e-3 * max.abs().max(1.0));
        }
        Ok(())
    }

    #[test]
    fn test_converges_to_mean_for_large_alpha() -> Result<()> {
        let q = [1.0, 2.0, 3.0];
        let alpha = 1e6;
        let v = soft_max(&q, alpha)?;
        assert!((v - alpha * 3f64.ln() - 2.0).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn test_shift_equivariance() -> Result<()> {
        let rng = fastrand::Rng::with_seed(0);
        for _ in 0..20 {
            let q = random_q(&rng, 3);
            let k = 100.0 * (rng.f64() - 0.5);
            let shifted = q.iter().map(|x| x + k).collect::<Vec<_>>();
            let v = soft_max(&q, 0.7)?;
            assert!((soft_max(&shifted, 0.7)? - v - k).abs() < 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_monotonic() -> Result<()> {
        let rng = fastrand::Rng::with_seed(1);
        for _ in 0..20 {
            let q = random_q(&rng, 4);
            let v = soft_max(&q, 0.5)?;
            for a in 0..q.len() {
                let mut q_ = q.clone();
                q_[a] += rng.f64();
                assert!(soft_max(&q_, 0.5)? >= v);
            }
        }
        Ok(())
    }

    #[test]
    fn test_no_overflow() -> Result<()> {
        let q = Tensor::new(&[[1000f32, 999.0], [-1000.0, -1000.0]], &Device::Cpu)?;
        let v: Vec<f32> = soft_max_value(&q, 1.0)?.to_vec1()?;
        assert!((v[0] - (1000.0 + (1.0 + (-1f32).exp()).ln())).abs() < 1e-3);
        assert!((v[1] - (-1000.0 + 2f32.ln())).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn test_scaled_values_overflow() -> Result<()> {
        let q = Tensor::new(&[[1e35f32, 0.0], [-1e35, -1e35]], &Device::Cpu)?;
        let v: Vec<f32> = soft_max_value(&q, 1e-4)?.to_vec1()?;
        assert_eq!(v[0], f32::INFINITY);
        assert_eq!(v[1], f32::NEG_INFINITY);
        Ok(())
    }

    #[test]
    fn test_empty_batch() -> Result<()> {
        let q = Tensor::zeros((0, 4), DType::F64, &Device::Cpu)?;
        let v = soft_max_value(&q, 1.0)?;
        assert_eq!(v.dims(), &[0]);
        assert_eq!(v.dtype(), DType::F64);
        Ok(())
    }

    #[test]
    fn test_two_actions() -> Result<()> {
        let q = Tensor::new(&[[2f32, 2.0], [0.0, 0.0]], &Device::Cpu)?;
        let v: Vec<f32> = soft_max_value(&q, 1.0)?.to_vec1()?;
        assert!((v[0] - 2.693_147).abs() < 1e-5);
        assert!((v[1] - 2f32.ln()).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_rank_1() -> Result<()> {
        let q = Tensor::new(&[0f32, 0.0, 0.0], &Device::Cpu)?;
        let v: Vec<f32> = soft_max_value(&q, 1.0)?.to_vec1()?;
        assert_eq!(v.len(), 1);
        assert!((v[0] - 3f32.ln()).abs() < 1e-6);
        Ok(())
    }
}
