//! Report Data Structures

use chrono::{DateTime, Utc};
use rollcheck_stats::{
    BootstrapDistribution, ConfidenceInterval, Decision, FrequencyTable, SummaryStatistics,
    TestResult,
};
use serde::{Deserialize, Serialize};

/// Current JSON layout version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Tool version, timestamp and settings
    pub meta: ReportMeta,
    /// Roll counts per group
    pub dataset: DatasetSummary,
    /// Summary statistics for all, charged and uncharged rolls
    pub descriptives: Vec<GroupDescriptives>,
    /// Chi-squared fairness test
    pub uniformity: UniformityReport,
    /// Kolmogorov-Smirnov comparison of the groups
    pub distribution_comparison: ComparisonReport,
    /// Bootstrap interval for the difference of means
    pub bootstrap: BootstrapReport,
    /// Yes/no answers derived from the sections
    pub findings: Findings,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Layout version of the serialized report
    pub schema_version: u32,
    /// rollcheck version that produced the report
    pub version: String,
    /// Generation time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Roll log the analysis was run on
    pub source: Option<String>,
    /// Effective analysis settings
    pub config: ReportConfig,
}

/// Analysis configuration captured in report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Significance level for both tests
    pub alpha: f64,
    /// Number of die faces
    pub faces: usize,
    /// Label of the lowest face
    pub lowest_face: i64,
    /// Requested bootstrap iterations
    pub bootstrap_iterations: usize,
    /// Coverage of the bootstrap interval
    pub confidence_level: f64,
    /// Seed the bootstrap actually ran with
    pub seed: Option<u64>,
    /// Whether the bootstrap ran on the rayon pool
    pub parallel: bool,
}

/// Row counts of the roll log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Rolls in the log
    pub total_rolls: usize,
    /// Rolls made after charging
    pub charged_rolls: usize,
    /// Rolls made without charging
    pub uncharged_rolls: usize,
}

/// Descriptive statistics for one group of rolls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDescriptives {
    /// Group name ("all", "charged", "uncharged")
    pub group: String,
    /// Number of rolls
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// 50th percentile
    pub median: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Lowest roll
    pub min: f64,
    /// Highest roll
    pub max: f64,
    /// 25th percentile
    pub q1: f64,
    /// 75th percentile
    pub q3: f64,
}

impl GroupDescriptives {
    /// Label a summary with its group name
    pub fn new(group: impl Into<String>, stats: &SummaryStatistics) -> Self {
        Self {
            group: group.into(),
            count: stats.count,
            mean: stats.mean,
            median: stats.median,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
            q1: stats.q1,
            q3: stats.q3,
        }
    }
}

/// Serializable hypothesis-test decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionLabel {
    /// Null hypothesis rejected at the chosen alpha
    Reject,
    /// Not enough evidence to reject the null hypothesis
    FailToReject,
}

impl From<Decision> for DecisionLabel {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Reject => DecisionLabel::Reject,
            Decision::FailToReject => DecisionLabel::FailToReject,
        }
    }
}

impl std::fmt::Display for DecisionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionLabel::Reject => write!(f, "REJECT"),
            DecisionLabel::FailToReject => write!(f, "FAIL TO REJECT"),
        }
    }
}

/// One hypothesis test as it appears in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Test statistic (chi-squared or D)
    pub statistic: f64,
    /// Probability of a statistic at least this extreme under the null
    pub p_value: f64,
    /// Significance level the decision used
    pub alpha: f64,
    /// Outcome at `alpha`
    pub decision: DecisionLabel,
    /// Present for the chi-squared test only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degrees_of_freedom: Option<usize>,
}

impl From<&TestResult> for TestOutcome {
    fn from(result: &TestResult) -> Self {
        Self {
            statistic: result.statistic,
            p_value: result.p_value,
            alpha: result.alpha,
            decision: result.decision.into(),
            degrees_of_freedom: result.degrees_of_freedom,
        }
    }
}

/// Observed vs expected count for a single face
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceCount {
    /// Face label
    pub face: i64,
    /// Observed count
    pub observed: u64,
    /// Expected count for a fair die
    pub expected: f64,
}

/// Chi-squared uniformity section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniformityReport {
    /// Observed vs expected count per face
    pub frequencies: Vec<FaceCount>,
    /// Test result
    pub test: TestOutcome,
}

impl UniformityReport {
    /// Combine a frequency table with its test result
    pub fn new(table: &FrequencyTable, result: &TestResult) -> Self {
        let expected = table.expected_uniform();
        let frequencies = table
            .iter()
            .map(|(category, observed)| FaceCount {
                face: category.label,
                observed,
                expected,
            })
            .collect();
        Self {
            frequencies,
            test: result.into(),
        }
    }
}

/// Kolmogorov-Smirnov section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// First group compared
    pub group_a: String,
    /// Second group compared
    pub group_b: String,
    /// Test result
    pub test: TestOutcome,
}

/// One bar of a histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub lower: f64,
    /// Upper edge
    pub upper: f64,
    /// Values falling in the bin
    pub count: usize,
}

/// Bootstrap section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapReport {
    /// Human-readable statistic, e.g. "mean(charged) - mean(uncharged)"
    pub statistic: String,
    /// Statistic on the original, non-resampled data
    pub observed: f64,
    /// Resamples actually drawn
    pub iterations: usize,
    /// Seed the resampling used
    pub seed: Option<u64>,
    /// Mean of the resampled statistics
    pub mean: f64,
    /// Standard deviation of the resampled statistics
    pub standard_error: f64,
    /// Lower interval bound
    pub ci_lower: f64,
    /// Upper interval bound
    pub ci_upper: f64,
    /// Interval coverage, e.g. 0.95
    pub ci_level: f64,
    /// Whether the interval includes zero
    pub contains_zero: bool,
    /// Share of resampled statistics below zero (descriptive only)
    pub proportion_below_zero: f64,
    /// Equal-width histogram of the resampled statistics
    pub histogram: Vec<HistogramBin>,
}

impl BootstrapReport {
    /// Summarize a bootstrap distribution and its interval
    pub fn new(
        statistic: impl Into<String>,
        observed: f64,
        distribution: &BootstrapDistribution,
        interval: &ConfidenceInterval,
        histogram_bins: usize,
    ) -> Self {
        Self {
            statistic: statistic.into(),
            observed,
            iterations: distribution.len(),
            seed: distribution.seed(),
            mean: distribution.mean(),
            standard_error: distribution.standard_error(),
            ci_lower: interval.lower,
            ci_upper: interval.upper,
            ci_level: interval.level,
            contains_zero: interval.contains_zero(),
            proportion_below_zero: distribution.proportion_below(0.0),
            histogram: crate::histogram(distribution.values(), histogram_bins),
        }
    }
}

/// Plain-language answers to the two questions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Findings {
    /// Chi-squared test did not reject uniformity
    pub die_is_fair: bool,
    /// K-S test rejected equal distributions
    pub charging_changes_distribution: bool,
    /// Bootstrap interval excludes zero
    pub charging_shifts_mean: bool,
}

impl Findings {
    /// Derive findings from the three report sections
    pub fn from_sections(
        uniformity: &UniformityReport,
        comparison: &ComparisonReport,
        bootstrap: &BootstrapReport,
    ) -> Self {
        Self {
            die_is_fair: uniformity.test.decision == DecisionLabel::FailToReject,
            charging_changes_distribution: comparison.test.decision == DecisionLabel::Reject,
            charging_shifts_mean: !bootstrap.contains_zero,
        }
    }
}
