//! Error type shared by every statistical procedure.

use thiserror::Error;

/// Errors produced by the statistics engine.
///
/// Every failure is detected before any computation starts, so a returned
/// error never comes with a partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Input rejected at the boundary: empty sample, value outside the
    /// declared categories, bad significance/coverage level, zero iterations.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StatsError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        StatsError::InvalidInput(msg.into())
    }
}

/// Check that a probability-like level lies strictly inside `(0, 1)`.
pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<(), StatsError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(StatsError::invalid(format!(
            "{name} must be between 0 and 1 (exclusive), got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_bounds() {
        assert!(check_unit_interval("alpha", 0.05).is_ok());
        assert!(check_unit_interval("alpha", 0.0).is_err());
        assert!(check_unit_interval("alpha", 1.0).is_err());
        assert!(check_unit_interval("alpha", f64::NAN).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = StatsError::invalid("sample is empty");
        assert_eq!(err.to_string(), "Invalid input: sample is empty");
    }
}
