#![warn(missing_docs)]
//! rollcheck Statistical Engine
//!
//! Stateless procedures answering "is this die fair?" and "does charging
//! change the outcome?":
//! - Chi-squared goodness-of-fit against equally likely faces
//! - Two-sample Kolmogorov-Smirnov comparison of roll distributions
//! - Bootstrap resampling of a difference of means with percentile intervals
//! - Descriptive summaries and percentile helpers
//!
//! Inputs are validated once, at [`Sample`] and [`Categories`] construction;
//! every failure surfaces as [`StatsError::InvalidInput`].

mod bootstrap;
mod error;
mod percentiles;
mod result;
mod sample;
mod summary;
mod two_sample;
mod uniformity;

pub use bootstrap::{
    BootstrapConfig, BootstrapDistribution, ConfidenceInterval, bootstrap_difference_of_means,
    bootstrap_two_sample, bootstrap_two_sample_with_rng, default_interval, difference_of_means,
    percentile_interval,
};
pub use error::StatsError;
pub use percentiles::{compute_percentile, percentile_of_sorted};
pub use result::{Decision, TestResult};
pub use sample::{Categories, Category, FrequencyTable, Sample};
pub use summary::{SummaryStatistics, compute_summary};
pub use two_sample::{compare_two_samples, kolmogorov_sf, ks_p_value, ks_statistic};
pub use uniformity::{test_frequency_table, test_uniformity};

/// Number of faces on the die under study
pub const DIE_FACES: usize = 10;

/// Largest number of categories a [`Categories`] support may declare
pub const MAX_CATEGORIES: usize = 100_000;

/// Default number of bootstrap iterations
pub const DEFAULT_BOOTSTRAP_ITERATIONS: usize = 10_000;

/// Default confidence level (95%)
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default significance level for hypothesis tests
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;
