//! Robust changepoint detection for regime shifts in mean
//!
//! This crate turns per-window shift tests into a short list of confirmed
//! regime boundaries, and classifies the newest point of a series.
//!
//! # Detectors
//!
//! - [`SequentialDetector`]: grows a window, scans it for significant splits
//!   with a Bonferroni-corrected trimmed t-test and commits a split once
//!   `min_agree` consecutive scans agree on it ([`VoteConsensus`])
//! - [`CusumDetector`]: two-sided CUSUM on robustly standardized windows
//!
//! # Layers on top
//!
//! - [`RegimeSummary`]: per-regime trimmed mean with bands
//! - [`RegressionAssessor`]: pass / warn / fail verdict for the newest point
//! - [`BatchAnalyzer`]: many independent series, on rayon when the
//!   `parallel` feature is enabled
//!
//! ## Usage
//!
//! ```rust
//! use robust_changepoint::{DetectorConfig, SequentialDetector};
//!
//! let mut data: Vec<f64> = (0..25).map(|i| 10.0 + 0.05 * (i % 3) as f64).collect();
//! data.extend((0..25).map(|i| 20.0 + 0.05 * (i % 3) as f64));
//!
//! let detector = SequentialDetector::new(DetectorConfig::default()).unwrap();
//! let detection = detector.detect(&data);
//!
//! assert_eq!(detection.result.changepoints(), &[0, 25]);
//! ```

pub mod batch;
pub mod config;
pub mod cusum;
pub mod decision;
pub mod detector;
pub mod kernel;
pub mod regime;
pub mod scanner;
pub mod traits;
pub mod types;
pub mod vote;

pub use batch::BatchAnalyzer;
pub use config::{BandMode, DetectorConfig, ShiftDirection};
pub use cusum::{CusumDetector, CusumParameters};
pub use decision::{RegressionAssessor, Verdict, VerdictStatus};
pub use detector::{Detection, ScanState, SequentialDetector};
pub use kernel::CusumKernel;
pub use regime::{validate_changepoints, Regime, RegimeSummary};
pub use scanner::{CandidateScanner, CandidateVote, ScanMode};
pub use traits::{ChangePointDetector, ChangePointDetectorProperties};
pub use types::{ChangePoint, ChangePointResult};
pub use vote::VoteConsensus;
