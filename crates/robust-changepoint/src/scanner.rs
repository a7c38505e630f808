//! Candidate split scanning within one window
//!
//! The splits with the largest first differences are tested with the
//! trimmed shift test. A split is significant when its statistic clears the
//! Bonferroni-corrected critical value for `num_test` comparisons, however
//! many splits a short window actually has. Exhaustive scans correct for every
//! interior split.

use robust_shift::{bonferroni_critical_value, ShiftTest};
use robust_spread::OutlierTrim;
use std::collections::BTreeMap;
use tracing::trace;

/// Significant splits of one window: absolute index to signed statistic
pub type CandidateVote = BTreeMap<usize, f64>;

/// Which splits of a window are tested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// The `num_test` splits with the largest first differences
    TopDifferences(usize),
    /// Every interior split
    Exhaustive,
}

/// Scans windows for significant mean-shift splits
#[derive(Debug, Clone, Copy)]
pub struct CandidateScanner {
    test: ShiftTest,
    alpha: f64,
    mode: ScanMode,
}

impl CandidateScanner {
    pub fn new(trim: OutlierTrim, alpha: f64, num_test: usize) -> Self {
        Self {
            test: ShiftTest::new(trim),
            alpha,
            mode: ScanMode::TopDifferences(num_test),
        }
    }

    /// Same scanner, testing every split
    pub fn exhaustive(mut self) -> Self {
        self.mode = ScanMode::Exhaustive;
        self
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Interior splits of `window` to test, in decreasing order of `|x[k] - x[k-1]|`
    ///
    /// Ties go to the earlier split.
    pub fn candidate_splits(&self, window: &[f64]) -> Vec<usize> {
        let n = window.len();
        if n < 2 {
            return Vec::new();
        }
        let mut splits: Vec<usize> = (1..n).collect();
        let diff = |k: usize| (window[k] - window[k - 1]).abs();
        splits.sort_by(|&a, &b| {
            let (da, db) = (diff(a), diff(b));
            match (da.is_nan(), db.is_nan()) {
                (false, false) => db.total_cmp(&da),
                _ => robust_core::utils::nan_last_cmp(&da, &db),
            }
            .then(a.cmp(&b))
        });
        if let ScanMode::TopDifferences(m) = self.mode {
            splits.truncate(m.min(n - 1));
        }
        splits
    }

    /// Number of comparisons the threshold is corrected for
    pub fn comparisons(&self, n: usize) -> usize {
        match self.mode {
            ScanMode::TopDifferences(m) => m,
            ScanMode::Exhaustive => n.saturating_sub(1),
        }
    }

    /// Critical value of a window of length `n`
    pub fn critical_value(&self, n: usize) -> f64 {
        bonferroni_critical_value(self.alpha, self.comparisons(n), n.saturating_sub(2))
    }

    /// Significant splits of `window`, reported at `offset + split`
    pub fn scan(&self, window: &[f64], offset: usize) -> CandidateVote {
        let n = window.len();
        let mut vote = CandidateVote::new();
        if n <= 2 {
            return vote;
        }

        let splits = self.candidate_splits(window);
        let critical = self.critical_value(n);
        for k in splits {
            let stat = self.test.split(window, k).statistic;
            if stat.abs() >= critical {
                vote.insert(offset + k, stat);
            }
        }

        trace!(
            offset,
            window = n,
            critical,
            significant = vote.len(),
            "scanned window"
        );
        vote
    }
}

impl Default for CandidateScanner {
    fn default() -> Self {
        Self::new(OutlierTrim::default(), 1e-4, 10)
    }
}
