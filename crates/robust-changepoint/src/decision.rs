//! Pass / warn / fail verdicts for the newest observation
//!
//! The detector is run on everything but the newest point. The most recent
//! regime, now including the newest point, is then scanned exhaustively for
//! splits in the regression direction. Those candidates are pushed into the
//! detector's final vote ring:
//!
//! - consensus: [`VerdictStatus::Fail`]
//! - candidates but no consensus: [`VerdictStatus::Warn`]
//! - nothing: [`VerdictStatus::Pass`]

use crate::config::DetectorConfig;
use crate::detector::SequentialDetector;
use crate::scanner::CandidateVote;
use robust_core::utils::{mean, population_std_dev};
use robust_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Outcome class of an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictStatus::Pass => write!(f, "pass"),
            VerdictStatus::Warn => write!(f, "warn"),
            VerdictStatus::Fail => write!(f, "fail"),
        }
    }
}

/// Assessment of the newest observation of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    /// Newest observation, `None` for an empty series
    pub latest_value: Option<f64>,
    /// Plain mean of the most recent regime, newest point included
    pub recent_mean: f64,
    /// Population standard deviation of the most recent regime
    pub recent_std: f64,
    /// Start of the most recent regime
    pub last_changepoint: usize,
    /// Split the votes agreed on, when the status is `Fail`
    pub confirmed_changepoint: Option<usize>,
    /// Regression-direction splits found in the most recent regime
    pub candidates: Vec<usize>,
    /// Too little history to judge anything
    pub cold_start: bool,
}

impl Verdict {
    pub fn is_regression(&self) -> bool {
        self.status == VerdictStatus::Fail
    }
}

/// Classifies the newest point of a series as pass, warn or fail
#[derive(Debug, Clone)]
pub struct RegressionAssessor {
    detector: SequentialDetector,
}

impl RegressionAssessor {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        Ok(Self {
            detector: SequentialDetector::new(config)?,
        })
    }

    pub fn from_detector(detector: SequentialDetector) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &SequentialDetector {
        &self.detector
    }

    #[instrument(skip(self, series), fields(n = series.len()))]
    pub fn assess(&self, series: &[f64]) -> Verdict {
        let n = series.len();
        let latest_value = series.last().copied();

        if n < 3 {
            debug!("cold start, passing");
            return Verdict {
                status: VerdictStatus::Pass,
                latest_value,
                recent_mean: mean(series),
                recent_std: population_std_dev(series),
                last_changepoint: 0,
                confirmed_changepoint: None,
                candidates: Vec::new(),
                cold_start: true,
            };
        }

        let detection = self.detector.detect(&series[..n - 1]);
        let last = detection.result.last_changepoint();
        let recent = &series[last..];

        let direction = self.detector.config().direction;
        let regressions: CandidateVote = self
            .detector
            .scanner()
            .exhaustive()
            .scan(recent, last)
            .into_iter()
            .filter(|&(_, stat)| direction.matches(stat))
            .map(|(index, stat)| (index, stat.abs()))
            .collect();
        let candidates: Vec<usize> = regressions.keys().copied().collect();

        let mut votes = detection.votes;
        votes.push(regressions);
        let confirmed_changepoint = votes.result();

        let status = if confirmed_changepoint.is_some() {
            VerdictStatus::Fail
        } else if !candidates.is_empty() {
            VerdictStatus::Warn
        } else {
            VerdictStatus::Pass
        };
        debug!(%status, last_changepoint = last, candidates = candidates.len(), "assessed");

        Verdict {
            status,
            latest_value,
            recent_mean: mean(recent),
            recent_std: population_std_dev(recent),
            last_changepoint: last,
            confirmed_changepoint,
            candidates,
            cold_start: false,
        }
    }
}
