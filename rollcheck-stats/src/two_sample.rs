//! Two-Sample Comparison
//!
//! Kolmogorov-Smirnov two-sample test. The statistic is the largest vertical
//! gap between the two empirical CDFs, evaluated at every distinct value of
//! the pooled data, so it is exact for discrete data such as die rolls.

use crate::error::StatsError;
use crate::result::{TestResult, check_alpha};
use crate::sample::Sample;

const SERIES_EPS_TERM: f64 = 0.001;
const SERIES_EPS_SUM: f64 = 1.0e-8;
const SERIES_MAX_TERMS: usize = 100;
// Below this, 1 - Q(lambda) < 1e-12
const SMALL_LAMBDA: f64 = 0.2;

/// Compare the distributions of two independent samples.
///
/// Returns `D = sup |F_a(x) - F_b(x)|` and its asymptotic p-value. The
/// decision is [`Reject`](crate::Decision::Reject) (the distributions
/// differ) iff `p < alpha`. Sample sizes may differ.
///
/// # Examples
///
/// ```
/// use rollcheck_stats::{Decision, Sample, compare_two_samples};
///
/// let charged = Sample::from_rolls([5u8, 5, 5]).unwrap();
/// let uncharged = Sample::from_rolls([5u8, 5, 5]).unwrap();
/// let result = compare_two_samples(&charged, &uncharged, 0.05).unwrap();
/// assert_eq!(result.statistic, 0.0);
/// assert_eq!(result.decision, Decision::FailToReject);
/// ```
pub fn compare_two_samples(a: &Sample, b: &Sample, alpha: f64) -> Result<TestResult, StatsError> {
    check_alpha(alpha)?;

    let statistic = ks_statistic(a.values(), b.values());
    let p_value = ks_p_value(statistic, a.len(), b.len());

    tracing::debug!(
        n_a = a.len(),
        n_b = b.len(),
        statistic,
        p_value,
        "two-sample Kolmogorov-Smirnov test"
    );

    Ok(TestResult::new(statistic, p_value, alpha, None))
}

/// Exact two-sample K-S distance between the empirical CDFs of `a` and `b`.
///
/// Returns 0.0 when either slice is empty.
pub fn ks_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_by(f64::total_cmp);
    b.sort_by(f64::total_cmp);

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;
    let (mut i, mut j) = (0usize, 0usize);
    let mut d: f64 = 0.0;

    // Step both ECDFs past each distinct pooled value. Once one side is
    // exhausted its ECDF is 1 and the gap can only shrink.
    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        d = d.max((i as f64 / n_a - j as f64 / n_b).abs());
    }

    d
}

/// Asymptotic p-value of a two-sample K-S distance `d` for sizes `n_a`, `n_b`.
///
/// Uses the effective size `n_a * n_b / (n_a + n_b)` with the Stephens
/// correction `lambda = (sqrt(ne) + 0.12 + 0.11 / sqrt(ne)) * d`.
pub fn ks_p_value(d: f64, n_a: usize, n_b: usize) -> f64 {
    if n_a == 0 || n_b == 0 {
        return 1.0;
    }
    let ne = (n_a as f64 * n_b as f64) / (n_a + n_b) as f64;
    let sqrt_ne = ne.sqrt();
    let lambda = (sqrt_ne + 0.12 + 0.11 / sqrt_ne) * d;
    kolmogorov_sf(lambda).clamp(0.0, 1.0)
}

/// Survival function of the Kolmogorov distribution,
/// `Q(lambda) = 2 * sum_{j>=1} (-1)^(j-1) * exp(-2 j^2 lambda^2)`.
///
/// The alternating series does not converge for small `lambda`, where the
/// true value is 1.
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda < SMALL_LAMBDA {
        return 1.0;
    }

    let a2 = -2.0 * lambda * lambda;
    let mut fac = 2.0;
    let mut sum = 0.0;
    let mut prev_term: f64 = 0.0;

    for j in 1..=SERIES_MAX_TERMS {
        let jf = j as f64;
        let term = fac * (a2 * jf * jf).exp();
        sum += term;
        if term.abs() <= SERIES_EPS_TERM * prev_term || term.abs() <= SERIES_EPS_SUM * sum {
            return sum;
        }
        fac = -fac;
        prev_term = term.abs();
    }

    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Decision;

    fn sample(values: &[f64]) -> Sample {
        Sample::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_identical_constant_samples() {
        let a = sample(&[5.0, 5.0, 5.0]);
        let b = sample(&[5.0, 5.0, 5.0]);
        let result = compare_two_samples(&a, &b, 0.05).unwrap();

        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
        assert_eq!(result.decision, Decision::FailToReject);
        assert_eq!(result.degrees_of_freedom, None);
    }

    #[test]
    fn test_identical_spread_samples() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let result = compare_two_samples(&sample(&values), &sample(&values), 0.05).unwrap();

        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_disjoint_supports() {
        let a = sample(&[1.0, 2.0, 3.0]);
        let b = sample(&[7.0, 8.0, 9.0, 10.0]);

        assert_eq!(ks_statistic(a.values(), b.values()), 1.0);
        assert_eq!(ks_statistic(b.values(), a.values()), 1.0);
    }

    #[test]
    fn test_large_disjoint_samples_reject() {
        let a: Vec<f64> = (0..50).map(|i| (i % 5) as f64 + 1.0).collect();
        let b: Vec<f64> = (0..50).map(|i| (i % 5) as f64 + 6.0).collect();
        let result = compare_two_samples(&sample(&a), &sample(&b), 0.05).unwrap();

        assert_eq!(result.statistic, 1.0);
        assert!(result.p_value < 1e-6);
        assert_eq!(result.decision, Decision::Reject);
    }

    #[test]
    fn test_ties_across_samples() {
        // F_a jumps to 0.5 at 1 and 1.0 at 2; F_b jumps to 0.25 at 1, 0.5 at 2, 1.0 at 3
        let a = [1.0, 1.0, 2.0, 2.0];
        let b = [1.0, 2.0, 3.0, 3.0];
        assert!((ks_statistic(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unequal_sizes_and_order_independence() {
        let a = [3.0, 1.0, 2.0];
        let b = [2.0, 6.0, 4.0, 5.0, 1.0];
        let forward = ks_statistic(&a, &b);
        let reverse = ks_statistic(&b, &a);
        assert!((forward - reverse).abs() < 1e-12);
        // at x = 3: F_a = 1.0, F_b = 0.4
        assert!((forward - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_kolmogorov_sf_known_values() {
        assert_eq!(kolmogorov_sf(0.0), 1.0);
        assert_eq!(kolmogorov_sf(0.1), 1.0);
        // Q(1.36) ~= 0.0494, the classic 5% critical value
        assert!((kolmogorov_sf(1.36) - 0.0494).abs() < 1e-3);
        // Q(1.0) ~= 0.2700
        assert!((kolmogorov_sf(1.0) - 0.2700).abs() < 1e-3);
        assert!(kolmogorov_sf(3.0) < 1e-6);
    }

    #[test]
    fn test_p_value_monotone_in_d() {
        let p_small = ks_p_value(0.1, 60, 65);
        let p_large = ks_p_value(0.4, 60, 65);
        assert!(p_small > p_large);
        assert!((0.0..=1.0).contains(&p_small));
    }

    #[test]
    fn test_invalid_alpha() {
        let a = sample(&[1.0]);
        assert!(matches!(
            compare_two_samples(&a, &a, -0.1),
            Err(StatsError::InvalidInput(_))
        ));
    }
}
