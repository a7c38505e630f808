//! Versioned detector configuration
//!
//! Every tunable of the vote detector, the regime bands and the verdict
//! layer lives in [`DetectorConfig`]. Missing fields deserialize to their
//! defaults, so a partial JSON/TOML document is a valid configuration.

use robust_core::{Error, Result};
use robust_spread::TrimParameters;
use serde::{Deserialize, Serialize};

/// How the band around each regime mean is sized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BandMode {
    /// `mean ± multiplier · std`
    Fixed { multiplier: f64 },
    /// `mean ± t · std / sqrt(len)`, `t` the two-sided critical value
    StandardError { significance: f64 },
}

impl Default for BandMode {
    fn default() -> Self {
        BandMode::Fixed { multiplier: 2.0 }
    }
}

impl BandMode {
    pub fn validate(&self) -> Result<()> {
        match *self {
            BandMode::Fixed { multiplier } if !(multiplier > 0.0) => {
                Err(Error::InvalidParameter(format!(
                    "Band multiplier must be positive, got {multiplier}"
                )))
            }
            BandMode::StandardError { significance }
                if !(significance > 0.0 && significance < 1.0) =>
            {
                Err(Error::invalid_probability(
                    "band significance",
                    significance,
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Which direction of level shift counts as a regression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    /// Level went down (throughput-like metrics)
    #[default]
    Decrease,
    /// Level went up (latency-like metrics)
    Increase,
}

impl ShiftDirection {
    /// Whether a signed shift statistic points in this direction
    ///
    /// Statistics are `left - right`, so a drop is positive.
    pub fn matches(&self, statistic: f64) -> bool {
        match self {
            ShiftDirection::Decrease => statistic > 0.0,
            ShiftDirection::Increase => statistic < 0.0,
        }
    }
}

/// Configuration of the vote detector and the layers built on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub version: u32,
    /// Family-wise significance level of one window scan
    pub alpha: f64,
    /// Consecutive scans that must agree before a changepoint is committed
    pub min_agree: usize,
    /// Splits tested per window
    pub num_test: usize,
    /// Largest window scanned
    pub lookback: usize,
    pub trim: TrimParameters,
    pub bands: BandMode,
    pub direction: ShiftDirection,
}

impl DetectorConfig {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn validate(&self) -> Result<()> {
        if self.version != Self::CURRENT_VERSION {
            return Err(Error::InvalidParameter(format!(
                "Unsupported configuration version {} (expected {})",
                self.version,
                Self::CURRENT_VERSION
            )));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(Error::invalid_probability("alpha", self.alpha));
        }
        if self.min_agree < 1 {
            return Err(Error::too_small("min_agree", 1, self.min_agree));
        }
        if self.num_test < 1 {
            return Err(Error::too_small("num_test", 1, self.num_test));
        }
        if self.lookback < 3 {
            return Err(Error::too_small("lookback", 3, self.lookback));
        }
        if self.num_test >= self.lookback {
            return Err(Error::InvalidParameter(format!(
                "num_test ({}) must be smaller than lookback ({})",
                self.num_test, self.lookback
            )));
        }
        self.trim.validate()?;
        self.bands.validate()
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_min_agree(mut self, min_agree: usize) -> Self {
        self.min_agree = min_agree;
        self
    }

    pub fn with_num_test(mut self, num_test: usize) -> Self {
        self.num_test = num_test;
        self
    }

    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn with_trim(mut self, trim: TrimParameters) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_bands(mut self, bands: BandMode) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_direction(mut self, direction: ShiftDirection) -> Self {
        self.direction = direction;
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            alpha: 1e-4,
            min_agree: 4,
            num_test: 10,
            lookback: 50,
            trim: TrimParameters::default(),
            bands: BandMode::default(),
            direction: ShiftDirection::default(),
        }
    }
}
