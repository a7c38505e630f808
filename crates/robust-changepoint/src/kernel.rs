//! Two-sided CUSUM kernel
//!
//! Standardized deviations `z_t` are accumulated into an upper and a lower
//! sum, each with a dead zone of `min_shift` and a per-step cap of
//! `max_influence`:
//!
//! ```text
//! C+_t = max(0, C+_{t-1} + min(max_influence,  z_t - min_shift))
//! C-_t = max(0, C-_{t-1} + min(max_influence, -z_t - min_shift))
//! ```
//!
//! Both sums are 0 at `t = 0`.

use robust_core::VARIANCE_FLOOR;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CusumKernel {
    min_shift: f64,
    max_influence: f64,
}

impl CusumKernel {
    pub fn new(min_shift: f64, max_influence: f64) -> Self {
        Self {
            min_shift,
            max_influence,
        }
    }

    /// `(x - center) / scale`, with the scale floored
    pub fn standardize(&self, data: &[f64], center: f64, scale: f64) -> Vec<f64> {
        let denom = scale + VARIANCE_FLOOR;
        data.iter().map(|&x| (x - center) / denom).collect()
    }

    /// Upper and lower cumulative sums of standardized values
    pub fn compute_cusum(&self, z: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let mut positive = Vec::with_capacity(z.len());
        let mut negative = Vec::with_capacity(z.len());
        if z.is_empty() {
            return (positive, negative);
        }

        let mut pos_sum = 0.0f64;
        let mut neg_sum = 0.0f64;
        positive.push(pos_sum);
        negative.push(neg_sum);
        for &value in &z[1..] {
            pos_sum = (pos_sum + (value - self.min_shift).min(self.max_influence)).max(0.0);
            neg_sum = (neg_sum + (-value - self.min_shift).min(self.max_influence)).max(0.0);
            positive.push(pos_sum);
            negative.push(neg_sum);
        }
        (positive, negative)
    }

    /// `max(C+_t, C-_t)` for every `t`
    pub fn statistics(&self, z: &[f64]) -> Vec<f64> {
        let (positive, negative) = self.compute_cusum(z);
        positive
            .into_iter()
            .zip(negative)
            .map(|(p, n)| p.max(n))
            .collect()
    }
}
