//! Bootstrap Resampling
//!
//! Builds the empirical sampling distribution of a two-sample statistic
//! (difference of means by default) by resampling both groups with
//! replacement, and reads percentile confidence intervals off it.
//!
//! Iteration `i` draws from its own ChaCha8 stream keyed by `(seed, i)`.
//! A seeded run therefore yields bit-identical output whether it runs
//! serially or on the Rayon pool, and no matter in which order the
//! iterations complete.

use crate::error::{StatsError, check_unit_interval};
use crate::percentiles::percentile_of_sorted;
use crate::sample::{Sample, mean};
use crate::{DEFAULT_BOOTSTRAP_ITERATIONS, DEFAULT_CONFIDENCE_LEVEL};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Iteration counts below this produce a warning
const LOW_ITERATION_WARNING: usize = 1_000;

/// Bootstrap configuration
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Number of resampling iterations (default: 10,000)
    pub iterations: usize,
    /// Seed for reproducible runs; a fresh one is drawn when `None`
    pub seed: Option<u64>,
    /// Spread iterations over the Rayon pool
    pub parallel: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_BOOTSTRAP_ITERATIONS,
            seed: None,
            parallel: true,
        }
    }
}

impl BootstrapConfig {
    /// Default configuration with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }
}

/// Confidence interval bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Coverage, e.g. 0.95
    pub level: f64,
}

impl ConfidenceInterval {
    /// Whether `value` lies within `[lower, upper]`
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Zero inside the interval means no evidence of a non-zero difference
    pub fn contains_zero(&self) -> bool {
        self.contains(0.0)
    }

    /// `upper - lower`
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Empirical sampling distribution produced by a bootstrap run
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapDistribution {
    values: Vec<f64>,
    sorted: Vec<f64>,
    seed: Option<u64>,
}

impl BootstrapDistribution {
    fn new(values: Vec<f64>, seed: Option<u64>) -> Self {
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        Self {
            values,
            sorted,
            seed,
        }
    }

    /// Statistics in iteration order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of iterations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the distribution holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Seed that reproduces this run, `None` for a caller-supplied RNG
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Mean of the bootstrap statistics
    pub fn mean(&self) -> f64 {
        mean(&self.values)
    }

    /// Standard deviation of the bootstrap statistics
    pub fn standard_error(&self) -> f64 {
        let m = self.mean();
        let variance =
            self.values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / self.values.len() as f64;
        variance.sqrt()
    }

    /// Percentile (0..=100) with linear interpolation between order statistics
    pub fn percentile(&self, percentile: f64) -> f64 {
        percentile_of_sorted(&self.sorted, percentile)
    }

    /// Fraction of statistics strictly below `threshold`
    pub fn proportion_below(&self, threshold: f64) -> f64 {
        let below = self.sorted.partition_point(|&x| x < threshold);
        below as f64 / self.sorted.len() as f64
    }

    /// Percentile confidence interval, see [`percentile_interval`]
    pub fn interval(&self, coverage: f64) -> Result<ConfidenceInterval, StatsError> {
        percentile_interval(self, coverage)
    }
}

/// Percentile-method confidence interval.
///
/// Bounds are the `(1 - coverage) / 2` and `(1 + coverage) / 2` quantiles,
/// so 95% coverage reads the 2.5th and 97.5th percentiles. Raising the
/// coverage never narrows the interval.
pub fn percentile_interval(
    distribution: &BootstrapDistribution,
    coverage: f64,
) -> Result<ConfidenceInterval, StatsError> {
    check_unit_interval("coverage", coverage)?;
    if distribution.is_empty() {
        return Err(StatsError::invalid("bootstrap distribution is empty"));
    }

    let tail = (1.0 - coverage) / 2.0 * 100.0;
    Ok(ConfidenceInterval {
        lower: distribution.percentile(tail),
        upper: distribution.percentile(100.0 - tail),
        level: coverage,
    })
}

/// Percentile interval at the default 95% coverage
pub fn default_interval(
    distribution: &BootstrapDistribution,
) -> Result<ConfidenceInterval, StatsError> {
    percentile_interval(distribution, DEFAULT_CONFIDENCE_LEVEL)
}

/// `mean(a) - mean(b)`
pub fn difference_of_means(a: &[f64], b: &[f64]) -> f64 {
    mean(a) - mean(b)
}

/// Bootstrap the difference of means between two groups.
///
/// # Examples
///
/// ```
/// use rollcheck_stats::{BootstrapConfig, Sample, bootstrap_difference_of_means};
///
/// let charged = Sample::from_rolls([10u8, 10, 10]).unwrap();
/// let uncharged = Sample::from_rolls([0u8, 0, 0]).unwrap();
/// let config = BootstrapConfig { iterations: 100, ..BootstrapConfig::seeded(7) };
///
/// let dist = bootstrap_difference_of_means(&charged, &uncharged, &config).unwrap();
/// let ci = dist.interval(0.95).unwrap();
/// assert_eq!((ci.lower, ci.upper), (10.0, 10.0));
/// ```
pub fn bootstrap_difference_of_means(
    a: &Sample,
    b: &Sample,
    config: &BootstrapConfig,
) -> Result<BootstrapDistribution, StatsError> {
    bootstrap_two_sample(a, b, difference_of_means, config)
}

/// Bootstrap any two-sample statistic.
///
/// Each iteration draws `|a|` values from `a` and `|b|` values from `b`
/// uniformly with replacement and records `statistic(resampled_a, resampled_b)`.
pub fn bootstrap_two_sample<F>(
    a: &Sample,
    b: &Sample,
    statistic: F,
    config: &BootstrapConfig,
) -> Result<BootstrapDistribution, StatsError>
where
    F: Fn(&[f64], &[f64]) -> f64 + Sync,
{
    check_iterations(config.iterations)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let a = a.values();
    let b = b.values();

    tracing::debug!(
        iterations = config.iterations,
        seed,
        parallel = config.parallel,
        n_a = a.len(),
        n_b = b.len(),
        "bootstrap resampling"
    );

    let values: Vec<f64> = if config.parallel {
        (0..config.iterations)
            .into_par_iter()
            .map_init(
                || (Vec::with_capacity(a.len()), Vec::with_capacity(b.len())),
                |(buf_a, buf_b), i| {
                    let mut rng = iteration_rng(seed, i);
                    resample_into(a, buf_a, &mut rng);
                    resample_into(b, buf_b, &mut rng);
                    statistic(buf_a.as_slice(), buf_b.as_slice())
                },
            )
            .collect()
    } else {
        let mut buf_a = Vec::with_capacity(a.len());
        let mut buf_b = Vec::with_capacity(b.len());
        (0..config.iterations)
            .map(|i| {
                let mut rng = iteration_rng(seed, i);
                resample_into(a, &mut buf_a, &mut rng);
                resample_into(b, &mut buf_b, &mut rng);
                statistic(buf_a.as_slice(), buf_b.as_slice())
            })
            .collect()
    };

    Ok(BootstrapDistribution::new(values, Some(seed)))
}

/// Serial bootstrap driven by a caller-supplied random source.
///
/// Useful for tests and for callers that already manage their RNG; the
/// resulting distribution carries no seed.
pub fn bootstrap_two_sample_with_rng<F, R>(
    a: &Sample,
    b: &Sample,
    statistic: F,
    iterations: usize,
    rng: &mut R,
) -> Result<BootstrapDistribution, StatsError>
where
    F: Fn(&[f64], &[f64]) -> f64,
    R: Rng,
{
    check_iterations(iterations)?;

    let a = a.values();
    let b = b.values();
    let mut buf_a = Vec::with_capacity(a.len());
    let mut buf_b = Vec::with_capacity(b.len());

    let values = (0..iterations)
        .map(|_| {
            resample_into(a, &mut buf_a, rng);
            resample_into(b, &mut buf_b, rng);
            statistic(buf_a.as_slice(), buf_b.as_slice())
        })
        .collect();

    Ok(BootstrapDistribution::new(values, None))
}

fn check_iterations(iterations: usize) -> Result<(), StatsError> {
    if iterations < 1 {
        return Err(StatsError::invalid("bootstrap needs at least 1 iteration"));
    }
    if iterations < LOW_ITERATION_WARNING {
        tracing::warn!(
            iterations,
            "low bootstrap iteration count; percentile bounds will be coarse"
        );
    }
    Ok(())
}

fn iteration_rng(seed: u64, iteration: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(iteration as u64);
    rng
}

fn resample_into<R: Rng>(source: &[f64], out: &mut Vec<f64>, rng: &mut R) {
    out.clear();
    let n = source.len();
    out.extend((0..n).map(|_| source[rng.gen_range(0..n)]));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(values: &[f64]) -> Sample {
        Sample::new(values.to_vec()).unwrap()
    }

    fn config(iterations: usize, seed: u64, parallel: bool) -> BootstrapConfig {
        BootstrapConfig {
            iterations,
            seed: Some(seed),
            parallel,
        }
    }

    #[test]
    fn test_constant_groups_give_constant_distribution() {
        let a = sample(&[10.0, 10.0, 10.0]);
        let b = sample(&[0.0, 0.0, 0.0]);
        let dist = bootstrap_difference_of_means(&a, &b, &config(100, 1, true)).unwrap();

        assert_eq!(dist.len(), 100);
        assert!(dist.values().iter().all(|&d| d == 10.0));
        let ci = percentile_interval(&dist, 0.95).unwrap();
        assert_eq!(ci.lower, 10.0);
        assert_eq!(ci.upper, 10.0);
        assert!(!ci.contains_zero());
        assert_eq!(dist.standard_error(), 0.0);
    }

    #[test]
    fn test_seeded_runs_are_bit_identical() {
        let a = sample(&[3.0, 7.0, 1.0, 9.0, 4.0, 6.0]);
        let b = sample(&[5.0, 2.0, 8.0, 4.0]);

        let first = bootstrap_difference_of_means(&a, &b, &config(2_000, 42, true)).unwrap();
        let second = bootstrap_difference_of_means(&a, &b, &config(2_000, 42, true)).unwrap();
        assert_eq!(first.values(), second.values());
        assert_eq!(first.seed(), Some(42));
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let a = sample(&[3.0, 7.0, 1.0, 9.0, 4.0, 6.0]);
        let b = sample(&[5.0, 2.0, 8.0, 4.0]);

        let serial = bootstrap_difference_of_means(&a, &b, &config(1_500, 9, false)).unwrap();
        let parallel = bootstrap_difference_of_means(&a, &b, &config(1_500, 9, true)).unwrap();
        assert_eq!(serial.values(), parallel.values());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = sample(&[3.0, 7.0, 1.0, 9.0, 4.0, 6.0]);
        let b = sample(&[5.0, 2.0, 8.0, 4.0]);

        let x = bootstrap_difference_of_means(&a, &b, &config(500, 1, false)).unwrap();
        let y = bootstrap_difference_of_means(&a, &b, &config(500, 2, false)).unwrap();
        assert_ne!(x.values(), y.values());
    }

    #[test]
    fn test_unseeded_run_records_seed() {
        let a = sample(&[1.0, 2.0, 3.0]);
        let b = sample(&[2.0, 3.0, 4.0]);
        let cfg = BootstrapConfig {
            iterations: 200,
            ..Default::default()
        };

        let first = bootstrap_difference_of_means(&a, &b, &cfg).unwrap();
        let seed = first.seed().unwrap();
        let replay = bootstrap_difference_of_means(&a, &b, &config(200, seed, false)).unwrap();
        assert_eq!(first.values(), replay.values());
    }

    #[test]
    fn test_interval_widens_with_coverage() {
        let a = sample(&[3.0, 7.0, 1.0, 9.0, 4.0, 6.0, 2.0, 8.0]);
        let b = sample(&[5.0, 2.0, 8.0, 4.0, 1.0, 10.0]);
        let dist = bootstrap_difference_of_means(&a, &b, &config(5_000, 3, true)).unwrap();

        let mut previous: Option<ConfidenceInterval> = None;
        for coverage in [0.90, 0.95, 0.99] {
            let ci = dist.interval(coverage).unwrap();
            assert!(ci.lower <= ci.upper);
            if let Some(prev) = previous {
                assert!(ci.lower <= prev.lower);
                assert!(ci.upper >= prev.upper);
            }
            previous = Some(ci);
        }
    }

    #[test]
    fn test_interval_brackets_observed_difference() {
        let a: Vec<f64> = (0..40).map(|i| (i % 10 + 1) as f64).collect();
        let b: Vec<f64> = (0..40).map(|i| (i % 10 + 1) as f64).collect();
        let dist =
            bootstrap_difference_of_means(&sample(&a), &sample(&b), &config(4_000, 11, true))
                .unwrap();
        let ci = dist.interval(0.95).unwrap();

        // Same data on both sides: the interval must straddle zero
        assert!(ci.contains_zero());
        assert!(dist.mean().abs() < 0.2);
        assert!(dist.proportion_below(0.0) > 0.3 && dist.proportion_below(0.0) < 0.7);
    }

    #[test]
    fn test_with_rng_is_reproducible() {
        let a = sample(&[1.0, 4.0, 9.0]);
        let b = sample(&[2.0, 3.0]);

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let x = bootstrap_two_sample_with_rng(&a, &b, difference_of_means, 300, &mut rng).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let y = bootstrap_two_sample_with_rng(&a, &b, difference_of_means, 300, &mut rng).unwrap();

        assert_eq!(x.values(), y.values());
        assert_eq!(x.seed(), None);
    }

    #[test]
    fn test_custom_statistic() {
        let a = sample(&[1.0, 2.0, 3.0]);
        let b = sample(&[4.0, 5.0]);
        let sizes = |x: &[f64], y: &[f64]| (x.len() * 10 + y.len()) as f64;
        let dist = bootstrap_two_sample(&a, &b, sizes, &config(50, 0, true)).unwrap();

        // resamples keep the group sizes
        assert!(dist.values().iter().all(|&v| v == 32.0));
    }

    #[test]
    fn test_resampled_values_come_from_source() {
        let a = sample(&[1.0, 2.0]);
        let b = sample(&[100.0]);
        let dist = bootstrap_difference_of_means(&a, &b, &config(500, 21, false)).unwrap();

        // mean(a*) is one of 1.0, 1.5, 2.0
        for &d in dist.values() {
            assert!(d == -99.0 || d == -98.5 || d == -98.0, "unexpected {d}");
        }
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let a = sample(&[1.0]);
        let result = bootstrap_difference_of_means(&a, &a, &config(0, 1, true));
        assert!(matches!(result, Err(StatsError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_coverage() {
        let a = sample(&[1.0, 2.0]);
        let dist = bootstrap_difference_of_means(&a, &a, &config(10, 1, false)).unwrap();
        assert!(percentile_interval(&dist, 0.0).is_err());
        assert!(percentile_interval(&dist, 1.0).is_err());
        assert!(default_interval(&dist).is_ok());
    }

    #[test]
    fn test_confidence_interval_helpers() {
        let ci = ConfidenceInterval {
            lower: -0.8,
            upper: 0.3,
            level: 0.95,
        };
        assert!(ci.contains_zero());
        assert!(ci.contains(-0.8));
        assert!(!ci.contains(0.31));
        assert!((ci.width() - 1.1).abs() < 1e-12);
    }
}
