//! Permutation test for a location shift
//!
//! Both samples are trimmed once. The trimmed values are pooled and
//! reshuffled `n_permutations` times into groups of the trimmed sizes, and the
//! observed difference of centres is compared against the shuffled ones.
//! The p-value uses the `(count + 1) / (N + 1)` convention, so it is never
//! zero.

use crate::traits::TwoSampleShiftTest;
use crate::types::TestOutcome;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use robust_core::utils::{mean, median};
use robust_core::{Error, Result};
use robust_spread::OutlierTrim;
use tracing::{debug, instrument};

/// Relative slack when comparing a permuted statistic to the observed one
const TIE_TOLERANCE: f64 = 1e-12;

/// Centre used to compare the two groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermutationStatistic {
    /// Difference of means
    #[default]
    Mean,
    /// Difference of medians
    Median,
}

/// Outcome of a permutation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PermutationOutcome {
    /// Observed `centre(left) - centre(right)`
    pub observed: f64,
    pub p_value: f64,
    pub n_permutations: usize,
    /// Values left in the pool after trimming both samples
    pub pooled_size: usize,
    /// Permutations at least as extreme as the observed difference
    pub exceedances: usize,
}

/// Seedable permutation test
#[derive(Debug, Clone)]
pub struct PermutationTest {
    n_permutations: usize,
    statistic: PermutationStatistic,
    trim: OutlierTrim,
    seed: Option<u64>,
}

impl PermutationTest {
    pub fn new(n_permutations: usize) -> Result<Self> {
        if n_permutations == 0 {
            return Err(Error::InvalidParameter(
                "Number of permutations must be positive".to_string(),
            ));
        }
        Ok(Self {
            n_permutations,
            statistic: PermutationStatistic::Mean,
            trim: OutlierTrim::default(),
            seed: None,
        })
    }

    pub fn with_statistic(mut self, statistic: PermutationStatistic) -> Self {
        self.statistic = statistic;
        self
    }

    pub fn with_trim(mut self, trim: OutlierTrim) -> Self {
        self.trim = trim;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn n_permutations(&self) -> usize {
        self.n_permutations
    }

    fn centre(&self, data: &[f64]) -> f64 {
        match self.statistic {
            PermutationStatistic::Mean => mean(data),
            PermutationStatistic::Median => median(data),
        }
    }

    fn difference(&self, left: &[f64], right: &[f64]) -> f64 {
        self.centre(left) - self.centre(right)
    }

    /// Run with the configured seed, or a fresh one if none was set
    pub fn run(&self, left: &[f64], right: &[f64]) -> PermutationOutcome {
        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.run_with_rng(left, right, &mut rng)
    }

    /// Run drawing permutations from a caller-supplied generator
    #[instrument(skip(self, left, right, rng), fields(n_left = left.len(), n_right = right.len()))]
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        left: &[f64],
        right: &[f64],
        rng: &mut R,
    ) -> PermutationOutcome {
        if left.is_empty() || right.is_empty() {
            return PermutationOutcome {
                observed: 0.0,
                p_value: 1.0,
                n_permutations: 0,
                pooled_size: 0,
                exceedances: 0,
            };
        }

        let left = self.trim.trim(left);
        let right = self.trim.trim(right);
        let observed = self.difference(&left, &right);
        let threshold = observed.abs() * (1.0 - TIE_TOLERANCE);

        let k = left.len();
        let mut pooled: Vec<f64> = left.iter().chain(&right).copied().collect();
        let mut exceedances = 0usize;
        for _ in 0..self.n_permutations {
            pooled.shuffle(rng);
            let (l, r) = pooled.split_at(k);
            if self.difference(l, r).abs() >= threshold {
                exceedances += 1;
            }
        }

        let p_value = (exceedances + 1) as f64 / (self.n_permutations + 1) as f64;
        debug!(
            "Permutation test: observed {:.4}, {} of {} permutations as extreme",
            observed, exceedances, self.n_permutations
        );

        PermutationOutcome {
            observed,
            p_value,
            n_permutations: self.n_permutations,
            pooled_size: pooled.len(),
            exceedances,
        }
    }
}

impl TwoSampleShiftTest for PermutationTest {
    fn name(&self) -> &'static str {
        "Permutation"
    }

    fn test(&self, left: &[f64], right: &[f64]) -> TestOutcome {
        let outcome = self.run(left, right);
        TestOutcome::new(outcome.observed, outcome.p_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_permutations_rejected() {
        assert!(PermutationTest::new(0).is_err());
    }

    #[test]
    fn test_empty_side() {
        let outcome = PermutationTest::new(10).unwrap().with_seed(1).run(&[], &[1.0, 2.0]);
        assert_eq!(outcome.p_value, 1.0);
        assert_eq!(outcome.n_permutations, 0);
    }

    #[test]
    fn test_clear_shift_is_significant() {
        let left: Vec<f64> = (0..15).map(|i| 20.0 + 0.1 * (i % 4) as f64).collect();
        let right: Vec<f64> = (0..15).map(|i| 10.0 + 0.1 * (i % 4) as f64).collect();
        let outcome = PermutationTest::new(499).unwrap().with_seed(7).run(&left, &right);
        assert!(outcome.observed > 9.0);
        assert_eq!(outcome.exceedances, 0);
        assert_eq!(outcome.p_value, 1.0 / 500.0);
    }

    #[test]
    fn test_identical_groups_not_significant() {
        let data: Vec<f64> = (0..12).map(|i| (i % 3) as f64).collect();
        let outcome = PermutationTest::new(200).unwrap().with_seed(3).run(&data, &data);
        // observed difference is exactly zero, every permutation ties or exceeds it
        assert_eq!(outcome.exceedances, 200);
        assert_eq!(outcome.p_value, 1.0);
    }

    #[test]
    fn test_seed_reproducible() {
        let left = [1.0, 2.5, 1.7, 3.1, 2.2];
        let right = [2.0, 2.9, 3.3, 2.8, 3.6];
        let test = PermutationTest::new(300).unwrap().with_seed(99);
        assert_eq!(test.run(&left, &right), test.run(&left, &right));
    }

    #[test]
    fn test_outlier_trimmed_before_pooling() {
        let offset = |i: usize| 0.1 * ((i % 5) as f64 - 2.0);
        let mut left: Vec<f64> = (0..15).map(|i| 10.0 + offset(i)).collect();
        left.push(1000.0);
        let right: Vec<f64> = (0..16).map(|i| 10.12 + offset(i)).collect();

        for statistic in [PermutationStatistic::Mean, PermutationStatistic::Median] {
            let outcome = PermutationTest::new(999)
                .unwrap()
                .with_statistic(statistic)
                .with_seed(1)
                .run(&left, &right);
            assert_eq!(outcome.pooled_size, 31);
            assert!(outcome.observed < 0.0);
            assert!(outcome.observed > -0.2);
        }

        let mean = PermutationTest::new(99).unwrap().with_seed(1).run(&left, &right);
        assert_relative_eq!(mean.observed, 10.0 - (10.12 - 0.2 / 16.0), epsilon = 1e-9);
    }

    #[test]
    fn test_median_statistic() {
        let test = PermutationTest::new(50)
            .unwrap()
            .with_statistic(PermutationStatistic::Median)
            .with_seed(5);
        let outcome = test.run(&[1.0, 2.0, 100.0], &[1.0, 1.5, 2.0]);
        assert_eq!(outcome.observed, 0.5);
    }
}
