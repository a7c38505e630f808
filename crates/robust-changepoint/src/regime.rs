//! Per-regime robust summaries
//!
//! Given a series and its changepoints, every regime gets a trimmed mean and
//! standard deviation, and a band around the mean sized by [`BandMode`]. The
//! per-index arrays are piecewise constant and have the series length.

use crate::config::BandMode;
use robust_core::{Error, Result};
use robust_shift::two_sided_critical_value;
use robust_spread::OutlierTrim;

/// One regime `[start, end)` and its robust moments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regime {
    pub start: usize,
    pub end: usize,
    pub mean: f64,
    pub std: f64,
}

impl Regime {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Half-width of the band around the mean
    pub fn half_width(&self, bands: BandMode) -> f64 {
        match bands {
            BandMode::Fixed { multiplier } => multiplier * self.std,
            BandMode::StandardError { significance } => {
                let len = self.len();
                if len < 2 {
                    return 0.0;
                }
                two_sided_critical_value(significance, len - 1) * self.std / (len as f64).sqrt()
            }
        }
    }
}

/// Check that `changepoints` partitions a series of length `n`
pub fn validate_changepoints(changepoints: &[usize], n: usize) -> Result<()> {
    match changepoints.first() {
        None => return Err(Error::invalid_changepoints("list is empty")),
        Some(&first) if first != 0 => {
            return Err(Error::invalid_changepoints(&format!(
                "first changepoint must be 0, got {first}"
            )))
        }
        _ => {}
    }
    if let Some(w) = changepoints.windows(2).find(|w| w[0] >= w[1]) {
        return Err(Error::invalid_changepoints(&format!(
            "not strictly increasing at {} -> {}",
            w[0], w[1]
        )));
    }
    if let Some(&last) = changepoints.last() {
        if last >= n {
            return Err(Error::invalid_changepoints(&format!(
                "{last} is out of range for a series of length {n}"
            )));
        }
    }
    Ok(())
}

/// Piecewise-constant mean and band arrays
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeSummary {
    pub mean: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    regimes: Vec<Regime>,
}

impl RegimeSummary {
    /// Summarize `series` split at `changepoints`
    ///
    /// An empty series gives empty arrays regardless of `changepoints`.
    pub fn compute(
        series: &[f64],
        changepoints: &[usize],
        trim: &OutlierTrim,
        bands: BandMode,
    ) -> Result<Self> {
        let n = series.len();
        if n == 0 {
            return Ok(Self {
                mean: Vec::new(),
                upper: Vec::new(),
                lower: Vec::new(),
                regimes: Vec::new(),
            });
        }
        validate_changepoints(changepoints, n)?;
        bands.validate()?;

        let ends = changepoints.iter().skip(1).copied().chain(std::iter::once(n));
        let regimes: Vec<Regime> = changepoints
            .iter()
            .zip(ends)
            .map(|(&start, end)| {
                let moments = trim.moments(&series[start..end]);
                Regime {
                    start,
                    end,
                    mean: moments.mean,
                    std: moments.std(),
                }
            })
            .collect();

        let mut mean = Vec::with_capacity(n);
        let mut upper = Vec::with_capacity(n);
        let mut lower = Vec::with_capacity(n);
        for regime in &regimes {
            let half = regime.half_width(bands);
            for _ in regime.start..regime.end {
                mean.push(regime.mean);
                upper.push(regime.mean + half);
                lower.push(regime.mean - half);
            }
        }

        Ok(Self {
            mean,
            upper,
            lower,
            regimes,
        })
    }

    pub fn regimes(&self) -> &[Regime] {
        &self.regimes
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}
