//! Robust tests for a shift in location
//!
//! - [`ShiftTest`]: t-type statistic on outlier-trimmed moments, with
//!   Student-t p-values
//! - [`PermutationTest`]: distribution-free alternative with a seedable RNG
//! - [`distribution`]: Student-t tail probabilities and (Bonferroni) critical
//!   values
//!
//! # Example
//!
//! ```
//! use robust_shift::ShiftTest;
//!
//! let before = [10.0, 10.1, 9.9, 10.05, 9.95];
//! let after = [12.0, 12.1, 11.9, 12.05, 11.95];
//! let stat = ShiftTest::default().two_sample(&before, &after);
//! assert!(stat.statistic < 0.0); // level went up
//! assert!(stat.p_value() < 1e-6);
//! ```

pub mod distribution;
pub mod permutation;
pub mod shift;
pub mod traits;
pub mod types;

pub use distribution::{
    bonferroni_critical_value, two_sided_critical_value, two_sided_p_value, upper_critical_value,
};
pub use permutation::{PermutationOutcome, PermutationStatistic, PermutationTest};
pub use shift::{ShiftStatistic, ShiftTest};
pub use traits::TwoSampleShiftTest;
pub use types::TestOutcome;
