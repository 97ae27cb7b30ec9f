//! Percentile Computation
//!
//! Linear interpolation between order statistics (the "R-7" rule, the
//! default of most statistics packages): the `p`-th percentile of `n`
//! sorted values sits at rank `p / 100 * (n - 1)`.

/// Compute a single percentile (0..=100) from unsorted samples.
///
/// Returns 0.0 for an empty slice.
///
/// # Examples
///
/// ```
/// # use rollcheck_stats::compute_percentile;
/// let samples = vec![4.0, 1.0, 3.0, 2.0, 5.0];
/// assert_eq!(compute_percentile(&samples, 50.0), 3.0);
/// assert_eq!(compute_percentile(&samples, 25.0), 2.0);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_of_sorted(&sorted, percentile)
}

/// Percentile of an already ascending slice.
///
/// `percentile` is clamped to `[0, 100]`. Returns 0.0 for an empty slice.
pub fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0];
    }

    let p = (percentile / 100.0).clamp(0.0, 1.0);
    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    if fraction == 0.0 {
        return sorted[lower_idx];
    }
    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}
