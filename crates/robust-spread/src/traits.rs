//! Core traits for spread estimation

use robust_core::VARIANCE_FLOOR;

/// Intrinsic properties of a spread estimator that don't depend on implementation details
pub trait SpreadEstimatorProperties {
    /// Get the name of this spread estimator
    fn name(&self) -> &str;

    /// Check if this estimator is robust to outliers
    fn is_robust(&self) -> bool;

    /// Get the asymptotic breakdown point (0.0 to 0.5)
    fn breakdown_point(&self) -> f64;
}

/// Spread/scale estimator over a plain sample
///
/// Estimators are total: an empty sample yields 0.0 rather than an error.
pub trait SpreadEstimator: SpreadEstimatorProperties {
    /// Estimate spread of an unsorted sample
    fn estimate(&self, data: &[f64]) -> f64;

    /// Compute spread from pre-sorted data
    fn estimate_sorted(&self, sorted_data: &[f64]) -> f64 {
        self.estimate(sorted_data)
    }
}

/// Robust scale estimators that can be used for standardization
pub trait RobustScale: SpreadEstimator {
    /// Absolute deviation of every point from `center`, divided by the
    /// scale estimate plus [`VARIANCE_FLOOR`]
    ///
    /// The floor keeps constant samples finite: all deviations are 0 and so
    /// are the scaled values.
    fn scaled_deviations(&self, data: &[f64], center: f64) -> Vec<f64> {
        let scale = self.estimate(data) + VARIANCE_FLOOR;
        data.iter().map(|&x| (x - center).abs() / scale).collect()
    }

    /// Standardize a single value using this scale estimate
    fn standardize(&self, sample: &[f64], value: f64) -> f64 {
        value / (self.estimate(sample) + VARIANCE_FLOOR)
    }
}
