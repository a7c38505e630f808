//! Robust t-type test for a shift in mean
//!
//! The two-sample statistic is the classical pooled-variance t statistic
//! evaluated on outlier-trimmed moments:
//!
//! ```text
//! pooled = ((k - 1) var_l + (n - k - 1) var_r) / (n - 2)
//! T      = sqrt(k (n - k) / n) * (mean_l - mean_r) / sqrt(pooled + eps)
//! ```
//!
//! where `k` is the size of the left segment and `n` the combined size.
//! A positive statistic means the level went *down* from left to right.

use crate::distribution::two_sided_p_value;
use crate::traits::TwoSampleShiftTest;
use crate::types::TestOutcome;
use robust_core::VARIANCE_FLOOR;
use robust_spread::OutlierTrim;

/// A test statistic together with its degrees of freedom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftStatistic {
    pub statistic: f64,
    pub degrees_of_freedom: usize,
}

impl ShiftStatistic {
    /// Statistic 0: never signals, p-value 1
    pub fn neutral(degrees_of_freedom: usize) -> Self {
        Self {
            statistic: 0.0,
            degrees_of_freedom,
        }
    }

    pub fn p_value(&self) -> f64 {
        if self.statistic == 0.0 {
            return 1.0;
        }
        two_sided_p_value(self.statistic, self.degrees_of_freedom)
    }

    pub fn outcome(&self) -> TestOutcome {
        TestOutcome::new(self.statistic, self.p_value())
    }
}

/// Shift-in-mean test on trimmed moments
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftTest {
    trim: OutlierTrim,
}

impl ShiftTest {
    pub fn new(trim: OutlierTrim) -> Self {
        Self { trim }
    }

    pub fn trim(&self) -> &OutlierTrim {
        &self.trim
    }

    /// Statistic for "the mean of `left` differs from the mean of `right`"
    ///
    /// Fewer than three points in total, or an empty side, gives the neutral
    /// statistic.
    pub fn two_sample(&self, left: &[f64], right: &[f64]) -> ShiftStatistic {
        let k = left.len();
        let n = k + right.len();
        if n <= 2 || left.is_empty() || right.is_empty() {
            return ShiftStatistic::neutral(n.saturating_sub(2));
        }

        let l = self.trim.moments(left);
        let r = self.trim.moments(right);

        let pooled = ((k - 1) as f64 * l.variance + (n - k - 1) as f64 * r.variance)
            / (n - 2) as f64;
        let weight = ((k * (n - k)) as f64 / n as f64).sqrt();

        ShiftStatistic {
            statistic: weight * (l.mean - r.mean) / (pooled + VARIANCE_FLOOR).sqrt(),
            degrees_of_freedom: n - 2,
        }
    }

    /// Split `series` at `split` and test the two sides
    pub fn split(&self, series: &[f64], split: usize) -> ShiftStatistic {
        let split = split.min(series.len());
        self.two_sample(&series[..split], &series[split..])
    }

    /// Statistic for "the mean of `sample` differs from zero"
    pub fn one_sample(&self, sample: &[f64]) -> ShiftStatistic {
        let n = sample.len();
        if n <= 2 {
            return ShiftStatistic::neutral(0);
        }
        let m = self.trim.moments(sample);
        ShiftStatistic {
            statistic: m.mean / (m.variance / (n - 2) as f64 + VARIANCE_FLOOR).sqrt(),
            degrees_of_freedom: n - 2,
        }
    }
}

impl TwoSampleShiftTest for ShiftTest {
    fn name(&self) -> &'static str {
        "Trimmed t"
    }

    fn test(&self, left: &[f64], right: &[f64]) -> TestOutcome {
        self.two_sample(left, right).outcome()
    }
}
