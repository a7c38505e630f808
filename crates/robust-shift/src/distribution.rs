//! Student-t tail probabilities and critical values
//!
//! All helpers are total. Zero degrees of freedom, NaN statistics and
//! out-of-range probabilities produce the non-signalling answer (p-value 1,
//! infinite critical value) rather than an error.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Standard Student-t with `df` degrees of freedom, if `df > 0`
pub fn students_t(df: usize) -> Option<StudentsT> {
    if df == 0 {
        return None;
    }
    StudentsT::new(0.0, 1.0, df as f64).ok()
}

/// Two-sided p-value `2 * (1 - CDF(|t|))`
pub fn two_sided_p_value(statistic: f64, df: usize) -> f64 {
    if statistic.is_nan() {
        return 1.0;
    }
    let Some(dist) = students_t(df) else {
        return 1.0;
    };
    (2.0 * (1.0 - dist.cdf(statistic.abs()))).clamp(0.0, 1.0)
}

/// Inverse survival function: the `t` with `P(T > t) = tail_probability`
///
/// Returns `+inf` when there are no degrees of freedom or the probability
/// is not in (0, 1), so a comparison `|t| >= critical` never fires.
pub fn upper_critical_value(tail_probability: f64, df: usize) -> f64 {
    if !(tail_probability > 0.0 && tail_probability < 1.0) {
        return f64::INFINITY;
    }
    match students_t(df) {
        Some(dist) => dist.inverse_cdf(1.0 - tail_probability),
        None => f64::INFINITY,
    }
}

/// Two-sided critical value at significance `alpha`: `t_{1 - alpha/2, df}`
pub fn two_sided_critical_value(alpha: f64, df: usize) -> f64 {
    upper_critical_value(alpha / 2.0, df)
}

/// Bonferroni-corrected two-sided critical value for `tests` simultaneous tests
pub fn bonferroni_critical_value(alpha: f64, tests: usize, df: usize) -> f64 {
    if tests == 0 {
        return f64::INFINITY;
    }
    upper_critical_value(alpha / (2.0 * tests as f64), df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cauchy_special_case() {
        // df = 1 is Cauchy: CDF(x) = 1/2 + atan(x)/pi
        assert_relative_eq!(two_sided_p_value(3f64.sqrt(), 1), 1.0 / 3.0, epsilon = 1e-7);
        assert_relative_eq!(upper_critical_value(0.25, 1), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_large_df_approaches_normal() {
        assert_relative_eq!(two_sided_critical_value(0.05, 10_000), 1.96, epsilon = 1e-2);
    }

    #[test]
    fn test_degenerate_inputs_do_not_signal() {
        assert_eq!(two_sided_p_value(5.0, 0), 1.0);
        assert_eq!(two_sided_p_value(f64::NAN, 10), 1.0);
        assert_eq!(upper_critical_value(0.01, 0), f64::INFINITY);
        assert_eq!(upper_critical_value(0.0, 10), f64::INFINITY);
        assert_eq!(upper_critical_value(1.5, 10), f64::INFINITY);
        assert_eq!(bonferroni_critical_value(0.01, 0, 10), f64::INFINITY);
    }

    #[test]
    fn test_zero_statistic_has_unit_p_value() {
        assert_relative_eq!(two_sided_p_value(0.0, 12), 1.0);
    }

    #[test]
    fn test_bonferroni_is_more_conservative() {
        let single = bonferroni_critical_value(0.01, 1, 20);
        let many = bonferroni_critical_value(0.01, 10, 20);
        assert!(many > single);
        assert_relative_eq!(single, two_sided_critical_value(0.01, 20));
    }

    #[test]
    fn test_infinite_statistic() {
        assert_eq!(two_sided_p_value(f64::INFINITY, 5), 0.0);
    }
}
