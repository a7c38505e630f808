//! Outlier-trimmed moments
//!
//! Points are scored by their distance from the median in units of the
//! standardized MAD. A point is discarded only when it is *both* beyond the
//! outlier threshold *and* among the `floor(n * p)` highest-scoring points,
//! so at most `floor(n * p)` points are ever removed and no point inside the
//! threshold is ever removed. Samples shorter than `ceil(1 / p)` are left
//! untouched.

use crate::mad::StandardizedMad;
use crate::traits::{RobustScale, SpreadEstimator, SpreadEstimatorProperties};
use robust_core::utils::{mean, median, nan_last_cmp, variance};
use robust_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters of the outlier trim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimParameters {
    /// Maximum proportion of the sample that may be removed, in [0, 1)
    pub max_proportion: f64,
    /// Scaled deviation at or beyond which a point counts as extreme
    pub outlier_threshold: f64,
}

impl Default for TrimParameters {
    fn default() -> Self {
        Self {
            max_proportion: 0.125,
            outlier_threshold: 3.0,
        }
    }
}

impl TrimParameters {
    /// Check ranges; the trim itself never re-validates
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.max_proportion) {
            return Err(Error::InvalidParameter(format!(
                "Trim proportion must be in [0, 1), got {}",
                self.max_proportion
            )));
        }
        if !(self.outlier_threshold > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Outlier threshold must be positive, got {}",
                self.outlier_threshold
            )));
        }
        Ok(())
    }
}

/// Mean and variance of the retained part of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimmedMoments {
    pub mean: f64,
    /// Sample variance (n - 1 denominator) of the retained points
    pub variance: f64,
    pub retained: usize,
    pub removed: usize,
}

impl TrimmedMoments {
    pub fn std(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// MAD-scored outlier trim
#[derive(Debug, Clone, Copy)]
pub struct OutlierTrim {
    params: TrimParameters,
    scale: StandardizedMad,
}

impl Default for OutlierTrim {
    fn default() -> Self {
        Self {
            params: TrimParameters::default(),
            scale: StandardizedMad::new(),
        }
    }
}

impl OutlierTrim {
    /// Create a trim removing at most `max_proportion` of a sample
    pub fn new(max_proportion: f64, outlier_threshold: f64) -> Result<Self> {
        Self::with_parameters(TrimParameters {
            max_proportion,
            outlier_threshold,
        })
    }

    pub fn with_parameters(params: TrimParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            scale: StandardizedMad::new(),
        })
    }

    /// A trim that never removes anything
    pub fn identity() -> Self {
        Self {
            params: TrimParameters {
                max_proportion: 0.0,
                ..TrimParameters::default()
            },
            scale: StandardizedMad::new(),
        }
    }

    pub fn parameters(&self) -> &TrimParameters {
        &self.params
    }

    /// Smallest sample size that is trimmed at all: `ceil(1 / p)`
    ///
    /// `None` when the proportion is zero.
    pub fn min_trim_size(&self) -> Option<usize> {
        if self.params.max_proportion <= 0.0 {
            None
        } else {
            Some((1.0 / self.params.max_proportion).ceil() as usize)
        }
    }

    /// Upper bound on the number of points removed from a sample of size `n`
    pub fn max_removed(&self, n: usize) -> usize {
        match self.min_trim_size() {
            Some(min) if n >= min => (n as f64 * self.params.max_proportion).floor() as usize,
            _ => 0,
        }
    }

    /// `true` for every point that survives the trim, in input order
    pub fn retained_mask(&self, data: &[f64]) -> Vec<bool> {
        let n = data.len();
        let budget = self.max_removed(n);
        if budget == 0 {
            return vec![true; n];
        }

        let center = median(data);
        let scores = self.scale.scaled_deviations(data, center);

        // Rank by score, ties broken by position so the trim is deterministic
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| nan_last_cmp(&scores[a], &scores[b]).then(a.cmp(&b)));

        let always_kept = n - budget;
        let mut mask = vec![false; n];
        for (rank, &idx) in order.iter().enumerate() {
            mask[idx] = rank < always_kept || scores[idx] < self.params.outlier_threshold;
        }
        mask
    }

    /// Retained points in their original order
    pub fn trim(&self, data: &[f64]) -> Vec<f64> {
        if self.max_removed(data.len()) == 0 {
            return data.to_vec();
        }
        data.iter()
            .zip(self.retained_mask(data))
            .filter_map(|(&x, keep)| keep.then_some(x))
            .collect()
    }

    pub fn moments(&self, data: &[f64]) -> TrimmedMoments {
        let retained = self.trim(data);
        TrimmedMoments {
            mean: mean(&retained),
            variance: variance(&retained),
            retained: retained.len(),
            removed: data.len() - retained.len(),
        }
    }

    pub fn mean(&self, data: &[f64]) -> f64 {
        self.moments(data).mean
    }

    pub fn std(&self, data: &[f64]) -> f64 {
        self.moments(data).std()
    }
}

/// Standard deviation of the outlier-trimmed sample
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimmedStd {
    trim: OutlierTrim,
}

impl TrimmedStd {
    pub fn new(trim: OutlierTrim) -> Self {
        Self { trim }
    }

    pub fn trim_proportion(&self) -> f64 {
        self.trim.parameters().max_proportion
    }
}

impl SpreadEstimatorProperties for TrimmedStd {
    fn name(&self) -> &str {
        "Trimmed Std Dev"
    }

    fn is_robust(&self) -> bool {
        self.trim_proportion() > 0.0
    }

    fn breakdown_point(&self) -> f64 {
        self.trim_proportion()
    }
}

impl SpreadEstimator for TrimmedStd {
    fn estimate(&self, data: &[f64]) -> f64 {
        self.trim.std(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn jittered(level: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| level + 0.01 * ((i % 5) as f64 - 2.0)).collect()
    }

    #[test]
    fn test_short_sample_untouched() {
        let trim = OutlierTrim::default();
        assert_eq!(trim.min_trim_size(), Some(8));
        // seven points, one wildly extreme: below ceil(1/p), so nothing goes
        let data = vec![1.0, 1.1, 0.9, 1.0, 1.05, 0.95, 1000.0];
        assert_eq!(trim.trim(&data), data);
    }

    #[test]
    fn test_single_outlier_removed() {
        let trim = OutlierTrim::default();
        let mut data = jittered(10.0, 20);
        data.insert(7, 1000.0);
        let moments = trim.moments(&data);
        assert_eq!(moments.removed, 1);
        assert_relative_eq!(moments.mean, 10.0, epsilon = 0.02);
        assert!(moments.std() < 0.05);
    }

    #[test]
    fn test_removal_capped_by_budget() {
        // 16 points: floor(16 * 0.125) = 2 may go, even though 4 are extreme
        let trim = OutlierTrim::default();
        let mut data = jittered(0.0, 12);
        data.extend([50.0, 60.0, -70.0, 80.0]);
        let kept = trim.trim(&data);
        assert_eq!(kept.len(), 14);
        // the two most extreme are the ones dropped
        assert!(!kept.contains(&80.0));
        assert!(!kept.contains(&-70.0));
        assert!(kept.contains(&50.0));
    }

    #[test]
    fn test_points_inside_threshold_never_removed() {
        // Evenly spread data: nothing exceeds three scaled MADs
        let trim = OutlierTrim::default();
        let data: Vec<f64> = (0..40).map(|i| i as f64).collect();
        assert_eq!(trim.trim(&data).len(), 40);
    }

    #[test]
    fn test_identity_trim() {
        let trim = OutlierTrim::identity();
        assert_eq!(trim.min_trim_size(), None);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 1e9];
        assert_eq!(trim.trim(&data), data);
    }

    #[test]
    fn test_constant_sample() {
        let trim = OutlierTrim::default();
        let moments = trim.moments(&[5.0; 12]);
        assert_eq!(moments.mean, 5.0);
        assert_eq!(moments.variance, 0.0);
        assert_eq!(moments.removed, 0);
    }

    #[test]
    fn test_empty_sample() {
        let moments = OutlierTrim::default().moments(&[]);
        assert_eq!(moments.mean, 0.0);
        assert_eq!(moments.variance, 0.0);
        assert_eq!(moments.retained, 0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(OutlierTrim::new(1.0, 3.0).is_err());
        assert!(OutlierTrim::new(-0.1, 3.0).is_err());
        assert!(OutlierTrim::new(0.1, 0.0).is_err());
        assert!(OutlierTrim::new(0.1, f64::NAN).is_err());
        assert!(OutlierTrim::new(0.0, 3.0).is_ok());
    }

    #[test]
    fn test_trimmed_std_estimator() {
        let est = TrimmedStd::default();
        let mut data = jittered(3.0, 15);
        data.push(-400.0);
        assert!(est.estimate(&data) < 0.05);
        assert!(est.is_robust());
        assert_eq!(est.breakdown_point(), 0.125);
    }
}
