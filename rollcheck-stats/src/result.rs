//! Hypothesis Test Results

use crate::error::{StatsError, check_unit_interval};

/// Outcome of comparing a p-value against the significance level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// p < alpha: the null hypothesis is rejected
    Reject,
    /// p >= alpha: not enough evidence against the null hypothesis
    FailToReject,
}

impl Decision {
    /// Apply the `p < alpha` rule
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        if p_value < alpha {
            Decision::Reject
        } else {
            Decision::FailToReject
        }
    }

    /// Whether the null hypothesis was rejected
    pub fn is_reject(self) -> bool {
        matches!(self, Decision::Reject)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Reject => write!(f, "reject"),
            Decision::FailToReject => write!(f, "fail to reject"),
        }
    }
}

/// Result of a single hypothesis test invocation
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// Test statistic (chi-squared value or K-S distance D)
    pub statistic: f64,
    /// Probability of a statistic at least this extreme under the null
    pub p_value: f64,
    /// Significance level the decision was taken at
    pub alpha: f64,
    /// Reject iff `p_value < alpha`
    pub decision: Decision,
    /// Degrees of freedom, for tests that have them
    pub degrees_of_freedom: Option<usize>,
}

impl TestResult {
    pub(crate) fn new(
        statistic: f64,
        p_value: f64,
        alpha: f64,
        degrees_of_freedom: Option<usize>,
    ) -> Self {
        let p_value = p_value.clamp(0.0, 1.0);
        Self {
            statistic,
            p_value,
            alpha,
            decision: Decision::from_p_value(p_value, alpha),
            degrees_of_freedom,
        }
    }

    /// Shorthand for `decision.is_reject()`
    pub fn is_significant(&self) -> bool {
        self.decision.is_reject()
    }
}

pub(crate) fn check_alpha(alpha: f64) -> Result<(), StatsError> {
    check_unit_interval("significance level", alpha)
}
