//! Robust regime-shift detection for noisy measurement series
//!
//! Separates sustained level shifts (e.g. a performance regression in a
//! recurring benchmark) from run-to-run noise and isolated outliers.
//!
//! - [`robust_spread`]: MAD-scored outlier trimming and trimmed moments
//! - [`robust_shift`]: trimmed t-test and permutation test for a shift in mean
//! - [`robust_changepoint`]: vote-based and CUSUM detectors, regime bands,
//!   pass / warn / fail verdicts and batch analysis
//!
//! # Example
//!
//! ```rust
//! use robust_regime::{DetectorConfig, RegressionAssessor, VerdictStatus};
//!
//! let mut timings: Vec<f64> = (0..30).map(|i| 20.0 + 0.05 * (i % 4) as f64).collect();
//! timings.extend([10.0, 10.05, 10.1, 10.0]);
//!
//! let assessor = RegressionAssessor::new(DetectorConfig::default())?;
//! let verdict = assessor.assess(&timings);
//! assert_eq!(verdict.status, VerdictStatus::Fail);
//! assert_eq!(verdict.confirmed_changepoint, Some(30));
//! # Ok::<(), robust_regime::Error>(())
//! ```

pub use robust_changepoint;
pub use robust_core;
pub use robust_shift;
pub use robust_spread;

pub use robust_core::{Error, Result};

pub use robust_spread::{OutlierTrim, TrimParameters, TrimmedMoments};

pub use robust_shift::{PermutationTest, ShiftStatistic, ShiftTest, TestOutcome};

pub use robust_changepoint::{
    BandMode, BatchAnalyzer, ChangePointDetector, ChangePointResult, CusumDetector,
    CusumParameters, Detection, DetectorConfig, Regime, RegimeSummary, RegressionAssessor,
    SequentialDetector, ShiftDirection, Verdict, VerdictStatus, VoteConsensus,
};
