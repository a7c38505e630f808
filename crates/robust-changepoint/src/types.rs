//! Types used for changepoint detection

use std::fmt;

/// A confirmed regime boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangePoint {
    /// First index of the new regime
    pub index: usize,
    /// Index of the newest observation at the time the change was confirmed
    pub detected_at: usize,
}

impl ChangePoint {
    pub fn new(index: usize, detected_at: usize) -> Self {
        Self { index, detected_at }
    }

    /// Observations that arrived between the change and its confirmation
    pub fn delay(&self) -> usize {
        self.detected_at.saturating_sub(self.index)
    }
}

impl fmt::Display for ChangePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChangePoint {{ index: {}, detected_at: {} }}",
            self.index, self.detected_at
        )
    }
}

/// Result of changepoint detection
///
/// `changepoints` always starts with the implicit boundary 0 and is strictly
/// increasing. `detection_points[i]` is the index at which `changepoints[i]`
/// was confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangePointResult {
    changepoints: Vec<usize>,
    detection_points: Vec<usize>,
    algorithm: String,
    sample_size: usize,
}

impl ChangePointResult {
    pub fn new(
        changepoints: Vec<usize>,
        detection_points: Vec<usize>,
        algorithm: impl Into<String>,
        sample_size: usize,
    ) -> Self {
        debug_assert_eq!(changepoints.len(), detection_points.len());
        Self {
            changepoints,
            detection_points,
            algorithm: algorithm.into(),
            sample_size,
        }
    }

    /// Result with only the implicit boundary at 0
    pub fn trivial(algorithm: impl Into<String>, sample_size: usize) -> Self {
        Self::new(vec![0], vec![0], algorithm, sample_size)
    }

    pub fn changepoints(&self) -> &[usize] {
        &self.changepoints
    }

    pub fn detection_points(&self) -> &[usize] {
        &self.detection_points
    }

    /// Paired changepoints and detection points
    pub fn iter(&self) -> impl Iterator<Item = ChangePoint> + '_ {
        self.changepoints
            .iter()
            .zip(&self.detection_points)
            .map(|(&index, &detected_at)| ChangePoint::new(index, detected_at))
    }

    /// Start of the most recent regime
    pub fn last_changepoint(&self) -> usize {
        self.changepoints.last().copied().unwrap_or(0)
    }

    /// Number of regimes, counting the implicit first one
    pub fn regime_count(&self) -> usize {
        self.changepoints.len()
    }

    /// Whether any boundary beyond the implicit one was found
    pub fn has_changepoints(&self) -> bool {
        self.changepoints.len() > 1
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

impl fmt::Display for ChangePointResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ChangePoint Detection Result:")?;
        writeln!(f, "  Algorithm: {}", self.algorithm)?;
        writeln!(f, "  Sample size: {}", self.sample_size)?;
        writeln!(f, "  Regimes: {}", self.regime_count())?;

        if self.has_changepoints() {
            writeln!(f, "  Detected changepoints:")?;
            for cp in self.iter().skip(1) {
                writeln!(f, "    {}", cp)?;
            }
        }

        Ok(())
    }
}
