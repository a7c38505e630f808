//! Trait implemented by every two-sample location-shift test

use crate::types::TestOutcome;

/// A test for a difference in location between two samples
///
/// The statistic is oriented so that a positive value means `left` sits
/// above `right`.
pub trait TwoSampleShiftTest {
    fn name(&self) -> &'static str;

    fn test(&self, left: &[f64], right: &[f64]) -> TestOutcome;
}
