#![warn(missing_docs)]
//! # rollcheck
//!
//! Statistical checks for a ten-sided die and a "charging" ritual performed
//! before some of its rolls.
//!
//! rollcheck answers two questions about a roll log:
//! - **Is the die fair?** Chi-squared goodness of fit of the observed face
//!   counts against equally likely faces
//! - **Does charging matter?** A two-sample Kolmogorov-Smirnov test of charged
//!   vs uncharged rolls, plus a bootstrap percentile interval for the
//!   difference of their means
//!
//! Every procedure is a pure function of its inputs. The bootstrap is
//! reproducible from a seed, and parallel runs give the same values as serial ones.
//!
//! ## Quick Start
//!
//! ```
//! use rollcheck::{Categories, Decision, Sample, test_uniformity};
//!
//! let rolls = Sample::from_rolls([1u8; 10]).unwrap();
//! let result = test_uniformity(&rolls, &Categories::d10(), 0.05).unwrap();
//!
//! assert_eq!(result.statistic, 90.0);
//! assert_eq!(result.decision, Decision::Reject);
//! ```
//!
//! ## Charged vs uncharged
//!
//! ```
//! use rollcheck::{BootstrapConfig, Sample, bootstrap_difference_of_means, compare_two_samples};
//!
//! let charged = Sample::from_rolls([7u8, 9, 10, 8, 6, 9]).unwrap();
//! let uncharged = Sample::from_rolls([2u8, 4, 3, 1, 5, 4]).unwrap();
//!
//! let ks = compare_two_samples(&charged, &uncharged, 0.05).unwrap();
//! assert_eq!(ks.statistic, 1.0);
//!
//! let config = BootstrapConfig { iterations: 1_000, ..BootstrapConfig::seeded(42) };
//! let dist = bootstrap_difference_of_means(&charged, &uncharged, &config).unwrap();
//! let ci = dist.interval(0.95).unwrap();
//! assert!(!ci.contains_zero());
//! ```
//!
//! ## Command line
//!
//! ```text
//! rollcheck analyze rolls.csv --seed 42 --format json
//! ```

// Re-export the statistics engine
pub use rollcheck_stats::{
    BootstrapConfig, BootstrapDistribution, Categories, Category, ConfidenceInterval,
    DEFAULT_BOOTSTRAP_ITERATIONS, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_SIGNIFICANCE_LEVEL, DIE_FACES,
    Decision, FrequencyTable, Sample, StatsError, SummaryStatistics, TestResult,
    bootstrap_difference_of_means, bootstrap_two_sample, bootstrap_two_sample_with_rng,
    compare_two_samples, compute_percentile, compute_summary, default_interval,
    difference_of_means, kolmogorov_sf, ks_p_value, ks_statistic, percentile_interval,
    test_frequency_table, test_uniformity,
};

// Re-export report types
pub use rollcheck_report::{
    BootstrapReport, ComparisonReport, DecisionLabel, Findings, OutputFormat, Report,
    UniformityReport, generate_json_report,
};

// Re-export the pipeline
pub use rollcheck_cli::{Roll, RollLog, RollcheckConfig, analyze, format_human_output};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BootstrapConfig, Categories, Decision, Sample, bootstrap_difference_of_means,
        compare_two_samples, test_uniformity,
    };
}

/// Run the rollcheck CLI.
///
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     rollcheck::run()
/// }
/// ```
pub use rollcheck_cli::run;
