//! Uniformity Testing
//!
//! Chi-squared goodness-of-fit against an equiprobable categorical model:
//! every one of the `k` categories is expected to receive `N / k` observations.

use crate::error::StatsError;
use crate::result::{TestResult, check_alpha};
use crate::sample::{Categories, FrequencyTable, Sample};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Test whether `sample` is uniformly spread over `categories`.
///
/// Computes `chi2 = sum((observed - expected)^2 / expected)` with
/// `expected = N / k` and `k - 1` degrees of freedom. The p-value is the
/// chi-squared survival function at `chi2`.
///
/// # Errors
///
/// [`StatsError::InvalidInput`] when a value falls outside the declared
/// categories or `alpha` is not in `(0, 1)`.
///
/// # Examples
///
/// ```
/// use rollcheck_stats::{Categories, Decision, Sample, test_uniformity};
///
/// let sample = Sample::from_rolls([1u8; 10]).unwrap();
/// let result = test_uniformity(&sample, &Categories::d10(), 0.05).unwrap();
/// assert!((result.statistic - 90.0).abs() < 1e-9);
/// assert_eq!(result.decision, Decision::Reject);
/// ```
pub fn test_uniformity(
    sample: &Sample,
    categories: &Categories,
    alpha: f64,
) -> Result<TestResult, StatsError> {
    check_alpha(alpha)?;
    let table = FrequencyTable::from_sample(sample, categories)?;
    test_frequency_table(&table, alpha)
}

/// Chi-squared uniformity test on an already bucketed [`FrequencyTable`].
pub fn test_frequency_table(table: &FrequencyTable, alpha: f64) -> Result<TestResult, StatsError> {
    check_alpha(alpha)?;

    let k = table.categories().len();
    if k < 2 {
        return Err(StatsError::invalid(format!(
            "need at least 2 categories, got {k}"
        )));
    }
    if table.total() == 0 {
        return Err(StatsError::invalid("frequency table is empty"));
    }

    let expected = table.expected_uniform();
    let statistic = chi_squared_statistic(table.counts(), expected);
    let df = k - 1;

    let distribution = ChiSquared::new(df as f64)
        .map_err(|e| StatsError::invalid(format!("chi-squared distribution: {e}")))?;
    let p_value = distribution.sf(statistic);

    tracing::debug!(
        k,
        total = table.total(),
        expected,
        statistic,
        p_value,
        "chi-squared uniformity test"
    );

    Ok(TestResult::new(statistic, p_value, alpha, Some(df)))
}

fn chi_squared_statistic(observed: &[u64], expected: f64) -> f64 {
    observed
        .iter()
        .map(|&o| (o as f64 - expected).powi(2) / expected)
        .sum()
}
