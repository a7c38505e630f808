//! Core traits for changepoint detection

use crate::types::ChangePointResult;
use robust_core::Result;

/// Properties of a changepoint detector that don't depend on the data
pub trait ChangePointDetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Shortest series on which the detector does any work
    ///
    /// Shorter series produce the trivial result `[0]`, not an error.
    fn minimum_sample_size(&self) -> usize;
}

/// Offline changepoint detection over a complete series
pub trait ChangePointDetector: ChangePointDetectorProperties {
    /// Detect regime boundaries in `series`
    fn detect_changepoints(&self, series: &[f64]) -> Result<ChangePointResult>;

    /// Process several independent series, in order
    fn detect_batch(&self, series: &[&[f64]]) -> Result<Vec<ChangePointResult>> {
        series
            .iter()
            .map(|s| self.detect_changepoints(s))
            .collect()
    }
}
