//! Median Absolute Deviation (MAD) estimators

use crate::traits::{RobustScale, SpreadEstimator, SpreadEstimatorProperties};
use robust_core::utils::{median, median_sorted};

/// Consistency factor that makes MAD comparable to the standard deviation
/// for normally distributed data
pub const MAD_CONSISTENCY_FACTOR: f64 = 1.4826;

/// Raw Median Absolute Deviation: `median(|x - median(x)|)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Mad;

impl Mad {
    /// Create a new MAD estimator
    pub fn new() -> Self {
        Self
    }
}

fn raw_mad_sorted(sorted_data: &[f64]) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let center = median_sorted(sorted_data);
    let deviations: Vec<f64> = sorted_data.iter().map(|&x| (x - center).abs()).collect();
    median(&deviations)
}

impl SpreadEstimatorProperties for Mad {
    fn name(&self) -> &str {
        "MAD"
    }

    fn is_robust(&self) -> bool {
        true
    }

    fn breakdown_point(&self) -> f64 {
        0.5
    }
}

impl SpreadEstimator for Mad {
    fn estimate(&self, data: &[f64]) -> f64 {
        raw_mad_sorted(&robust_core::utils::sorted(data))
    }

    fn estimate_sorted(&self, sorted_data: &[f64]) -> f64 {
        raw_mad_sorted(sorted_data)
    }
}

impl RobustScale for Mad {}

/// Standardized MAD estimator (scaled by consistency factor)
///
/// The consistency factor (1.4826) makes it comparable to standard deviation
/// for normally distributed data.
#[derive(Debug, Clone, Copy)]
pub struct StandardizedMad {
    consistency_factor: f64,
}

impl StandardizedMad {
    /// Create with default consistency factor
    pub fn new() -> Self {
        Self {
            consistency_factor: MAD_CONSISTENCY_FACTOR,
        }
    }

    /// Create with custom consistency factor
    pub fn with_factor(consistency_factor: f64) -> Self {
        Self { consistency_factor }
    }

    pub fn consistency_factor(&self) -> f64 {
        self.consistency_factor
    }
}

impl Default for StandardizedMad {
    fn default() -> Self {
        Self::new()
    }
}

impl SpreadEstimatorProperties for StandardizedMad {
    fn name(&self) -> &str {
        "Standardized MAD"
    }

    fn is_robust(&self) -> bool {
        true
    }

    fn breakdown_point(&self) -> f64 {
        0.5
    }
}

impl SpreadEstimator for StandardizedMad {
    fn estimate(&self, data: &[f64]) -> f64 {
        self.consistency_factor * Mad.estimate(data)
    }

    fn estimate_sorted(&self, sorted_data: &[f64]) -> f64 {
        self.consistency_factor * Mad.estimate_sorted(sorted_data)
    }
}

impl RobustScale for StandardizedMad {}
