//! Robust spread measurements for regime analysis
//!
//! This crate provides the outlier-resistant summary statistics that every
//! hypothesis test in the workspace is built on:
//!
//! - MAD (Median Absolute Deviation), raw and standardized
//! - [`OutlierTrim`]: MAD-scored trimming with a bounded removal budget
//! - Trimmed mean / standard deviation via [`OutlierTrim::moments`]
//!
//! # Estimator Properties
//!
//! | Estimator | Breakdown Point | Use When |
//! |-----------|----------------|----------|
//! | Std Dev | 0% | Data is clean |
//! | MAD | 50% | Scoring how extreme a point is |
//! | Trimmed Std | `p` | Known upper bound on contamination |
//!
//! # Example
//!
//! ```rust
//! use robust_spread::OutlierTrim;
//!
//! let mut sample = vec![10.0, 10.1, 9.9, 10.05, 9.95, 10.0, 10.02, 9.98];
//! sample.push(1000.0); // a single wild timer reading
//!
//! let trim = OutlierTrim::default(); // removes at most 12.5% of the sample
//! let moments = trim.moments(&sample);
//! assert_eq!(moments.removed, 1);
//! assert!((moments.mean - 10.0).abs() < 0.05);
//! ```

pub mod mad;
pub mod traits;
pub mod trimmed;

pub use mad::{Mad, StandardizedMad, MAD_CONSISTENCY_FACTOR};
pub use traits::{RobustScale, SpreadEstimator, SpreadEstimatorProperties};
pub use trimmed::{OutlierTrim, TrimParameters, TrimmedMoments, TrimmedStd};
