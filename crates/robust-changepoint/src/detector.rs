//! Sequential vote-based changepoint detector
//!
//! The detector grows a window one observation at a time, scans it for
//! significant splits and feeds each scan into a [`VoteConsensus`]. Once
//! `min_agree` consecutive scans agree on a split, the split is committed
//! and scanning restarts from it with fresh votes.
//!
//! The loop is written as an explicit state machine:
//!
//! | state | consensus | next |
//! |-------|-----------|------|
//! | `Scanning { start, end }` | `Some(c)` | `Committing { changepoint: c, detected_at: end - 1 }` |
//! | `Scanning { start, end }` | `None`, `end < n` | `Scanning { start: max(start, end + 1 - lookback), end: end + 1 }` |
//! | `Scanning { start, end }` | `None`, `end == n` | `Finished` |
//! | `Committing { changepoint: c, .. }` | | `Scanning { start: c, end: c + 1 }` |

use crate::config::DetectorConfig;
use crate::scanner::CandidateScanner;
use crate::traits::{ChangePointDetector, ChangePointDetectorProperties};
use crate::types::ChangePointResult;
use crate::vote::VoteConsensus;
use robust_core::Result;
use robust_spread::OutlierTrim;
use tracing::{debug, instrument};

/// Position of the detector in its scan of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Scan the half-open window `[start, end)`
    Scanning { start: usize, end: usize },
    /// Record `changepoint`, confirmed when `detected_at` was the newest point
    Committing {
        changepoint: usize,
        detected_at: usize,
    },
    Finished,
}

impl ScanState {
    pub fn initial() -> Self {
        ScanState::Scanning { start: 0, end: 1 }
    }

    /// Transition after a scan (or a commit) of a series of length `n`
    ///
    /// `consensus` is only consulted in the `Scanning` state.
    pub fn next(self, consensus: Option<usize>, n: usize, lookback: usize) -> Self {
        match self {
            ScanState::Scanning { start, end } => match consensus {
                Some(changepoint) => ScanState::Committing {
                    changepoint,
                    detected_at: end - 1,
                },
                None if end < n => ScanState::Scanning {
                    start: start.max((end + 1).saturating_sub(lookback)),
                    end: end + 1,
                },
                None => ScanState::Finished,
            },
            ScanState::Committing { changepoint, .. } => ScanState::Scanning {
                start: changepoint,
                end: changepoint + 1,
            },
            ScanState::Finished => ScanState::Finished,
        }
    }
}

/// Output of one detection run
#[derive(Debug, Clone)]
pub struct Detection {
    pub result: ChangePointResult,
    /// Vote ring as it stood when the scan finished
    pub votes: VoteConsensus,
}

/// Vote-based sequential detector
#[derive(Debug, Clone)]
pub struct SequentialDetector {
    config: DetectorConfig,
    scanner: CandidateScanner,
}

impl SequentialDetector {
    /// Create a detector from a validated configuration
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        let trim = OutlierTrim::with_parameters(config.trim)?;
        let scanner = CandidateScanner::new(trim, config.alpha, config.num_test);
        Ok(Self { config, scanner })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn scanner(&self) -> &CandidateScanner {
        &self.scanner
    }

    /// Empty vote ring sized for this detector
    pub fn empty_votes(&self) -> VoteConsensus {
        VoteConsensus::new(self.config.min_agree)
    }

    /// Run the scan over `series`
    #[instrument(skip(self, series), fields(n = series.len()))]
    pub fn detect(&self, series: &[f64]) -> Detection {
        let n = series.len();
        let mut votes = self.empty_votes();
        let mut changepoints = vec![0];
        let mut detection_points = vec![0];

        if n < self.minimum_sample_size() {
            return Detection {
                result: ChangePointResult::trivial(self.algorithm_name(), n),
                votes,
            };
        }

        let lookback = self.config.lookback;
        let mut state = ScanState::initial();
        loop {
            let consensus = match state {
                ScanState::Scanning { start, end } => {
                    let start = start.max(end.saturating_sub(lookback));
                    votes.push(self.scanner.scan(&series[start..end], start));
                    votes.result()
                }
                ScanState::Committing {
                    changepoint,
                    detected_at,
                } => {
                    debug!(changepoint, detected_at, "committing changepoint");
                    changepoints.push(changepoint);
                    detection_points.push(detected_at);
                    votes.reset();
                    None
                }
                ScanState::Finished => break,
            };
            state = state.next(consensus, n, lookback);
        }

        debug!(
            regimes = changepoints.len(),
            last = changepoints.last().copied().unwrap_or(0),
            "scan finished"
        );

        Detection {
            result: ChangePointResult::new(
                changepoints,
                detection_points,
                self.algorithm_name(),
                n,
            ),
            votes,
        }
    }
}

impl ChangePointDetectorProperties for SequentialDetector {
    fn algorithm_name(&self) -> &'static str {
        "Vote"
    }

    fn minimum_sample_size(&self) -> usize {
        3
    }
}

impl ChangePointDetector for SequentialDetector {
    fn detect_changepoints(&self, series: &[f64]) -> Result<ChangePointResult> {
        Ok(self.detect(series).result)
    }
}
