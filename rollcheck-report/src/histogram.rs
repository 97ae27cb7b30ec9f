//! Histogram Binning
//!
//! Equal-width bins over the observed range, used to draw the bootstrap
//! distribution in text output.

use crate::report::HistogramBin;

/// Bucket `values` into `bins` equal-width bins spanning `[min, max]`.
///
/// The last bin is closed on the right so the maximum is counted. A constant
/// input yields a single zero-width bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_every_value() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let bins = histogram(&values, 10);

        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 101);
        assert_eq!(bins[0].lower, 0.0);
        assert!((bins[9].upper - 100.0).abs() < 1e-9);
        // max lands in the last bin
        assert_eq!(bins[9].count, 11);
    }

    #[test]
    fn test_constant_values() {
        let bins = histogram(&[10.0; 5], 20);
        assert_eq!(
            bins,
            vec![HistogramBin {
                lower: 10.0,
                upper: 10.0,
                count: 5
            }]
        );
    }

    #[test]
    fn test_empty() {
        assert!(histogram(&[], 5).is_empty());
        assert!(histogram(&[1.0], 0).is_empty());
    }
}
