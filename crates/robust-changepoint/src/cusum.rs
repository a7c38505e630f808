//! Sequential CUSUM changepoint detection
//!
//! A window `[i, j)` is grown one point at a time. Each window is
//! standardized by its median and a scale that blends the previous regime's
//! scale (the prior) with a robust estimate from the window itself. When the
//! final CUSUM statistic of the window reaches the threshold, the change is
//! placed just after the last position where the statistic was still below
//! a quarter of the threshold.

use crate::kernel::CusumKernel;
use crate::traits::{ChangePointDetector, ChangePointDetectorProperties};
use crate::types::ChangePointResult;
use robust_core::utils::{median, std_dev};
use robust_core::{Error, Result};
use robust_spread::{SpreadEstimator, StandardizedMad};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// CUSUM parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CusumParameters {
    /// Points used to seed the scale estimate
    pub startup: usize,
    /// Detection threshold on `max(C+, C-)`
    pub threshold: f64,
    /// Dead zone, in standardized units
    pub min_shift: f64,
    /// Cap on the contribution of a single point
    pub max_influence: f64,
    /// Weight of the prior scale, in equivalent observations
    pub prior_weight: f64,
}

impl Default for CusumParameters {
    fn default() -> Self {
        Self {
            startup: 10,
            threshold: 6.0,
            min_shift: 0.5,
            max_influence: 4.0,
            prior_weight: 5.0,
        }
    }
}

impl CusumParameters {
    pub fn validate(&self) -> Result<()> {
        if self.startup < 2 {
            return Err(Error::too_small("startup", 2, self.startup));
        }
        for (name, value) in [
            ("threshold", self.threshold),
            ("max_influence", self.max_influence),
            ("prior_weight", self.prior_weight),
        ] {
            if !(value > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.min_shift >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "min_shift must be non-negative, got {}",
                self.min_shift
            )));
        }
        Ok(())
    }
}

/// CUSUM changepoint detector
#[derive(Debug, Clone)]
pub struct CusumDetector {
    kernel: CusumKernel,
    params: CusumParameters,
    scale: StandardizedMad,
}

impl CusumDetector {
    pub fn new(params: CusumParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            kernel: CusumKernel::new(params.min_shift, params.max_influence),
            params,
            scale: StandardizedMad::new(),
        })
    }

    pub fn parameters(&self) -> &CusumParameters {
        &self.params
    }

    /// Robust scale of a window: standardized MAD from five points, else sample std
    fn window_scale(&self, window: &[f64]) -> f64 {
        if window.len() >= 5 {
            self.scale.estimate(window)
        } else {
            std_dev(window)
        }
    }

    /// Prior scale blended with the window's own scale
    fn blended_scale(&self, prior: f64, window: &[f64]) -> f64 {
        let n = window.len();
        if n < 2 {
            return prior;
        }
        let w = self.params.prior_weight;
        (w * prior + n as f64 * self.window_scale(window)) / (w + n as f64)
    }

    #[instrument(skip(self, series), fields(n = series.len()))]
    pub fn detect(&self, series: &[f64]) -> ChangePointResult {
        let n = series.len();
        let startup = self.params.startup;
        if n < self.minimum_sample_size() {
            return ChangePointResult::trivial(self.algorithm_name(), n);
        }

        let mut changepoints = vec![0];
        let mut detection_points = vec![0];

        // scale in force when each index was the window end
        let mut scales = vec![0.0; n];
        let initial = std_dev(&series[..startup]);
        scales[..startup].fill(initial);

        let mut prior = initial;
        let mut i = 0;
        let mut j = 1;
        while j < n {
            let window = &series[i..j];
            scales[j] = self.blended_scale(prior, window);
            let z = self.kernel.standardize(window, median(window), scales[j]);
            let stats = self.kernel.statistics(&z);

            let last = stats.last().copied().unwrap_or(0.0);
            if last >= self.params.threshold {
                let quiet = self.params.threshold / 4.0;
                let regime_len = stats
                    .iter()
                    .rposition(|&s| s < quiet)
                    .map_or(0, |k| k + 1);
                i += regime_len;
                debug!(changepoint = i, detected_at = j, "cusum changepoint");
                changepoints.push(i);
                detection_points.push(j);
                prior = scales[i - 1];
                j = i + 1;
            } else {
                j += 1;
            }
        }

        ChangePointResult::new(changepoints, detection_points, self.algorithm_name(), n)
    }
}

impl Default for CusumDetector {
    fn default() -> Self {
        Self {
            kernel: CusumKernel::new(0.5, 4.0),
            params: CusumParameters::default(),
            scale: StandardizedMad::new(),
        }
    }
}

impl ChangePointDetectorProperties for CusumDetector {
    fn algorithm_name(&self) -> &'static str {
        "CUSUM"
    }

    fn minimum_sample_size(&self) -> usize {
        self.params.startup + 1
    }
}

impl ChangePointDetector for CusumDetector {
    fn detect_changepoints(&self, series: &[f64]) -> Result<ChangePointResult> {
        Ok(self.detect(series))
    }
}
