//! Summary Statistics
//!
//! Descriptive numbers reported next to the hypothesis tests: location,
//! spread, extremes and quartiles of a sample.

use crate::percentiles::percentile_of_sorted;
use crate::sample::Sample;

/// Descriptive statistics of one sample
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator), 0.0 for a single value
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// 25th percentile
    pub q1: f64,
    /// 75th percentile
    pub q3: f64,
}

/// Compute summary statistics for a sample
pub fn compute_summary(sample: &Sample) -> SummaryStatistics {
    let values = sample.values();
    let count = values.len();

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = sample.mean();
    let std_dev = if count < 2 {
        0.0
    } else {
        let variance =
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        variance.sqrt()
    };

    SummaryStatistics {
        count,
        mean,
        median: percentile_of_sorted(&sorted, 50.0),
        std_dev,
        min: sorted[0],
        max: sorted[count - 1],
        q1: percentile_of_sorted(&sorted, 25.0),
        q3: percentile_of_sorted(&sorted, 75.0),
    }
}

impl SummaryStatistics {
    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Standard error of the mean
    pub fn standard_error(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.std_dev / (self.count as f64).sqrt()
    }
}
