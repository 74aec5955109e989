//! Severity classification of elapsed time against a target.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Ratio of elapsed to target below which a card is `Low`.
pub const DEFAULT_MEDIUM_RATIO: f64 = 0.5;

/// Ratio of elapsed to target at or above which a card is `High`.
///
/// Two values have been used for this boundary historically, 0.75 and 0.90.
/// 0.90 is the default; deployments that want the earlier warning configure
/// `severity.high_ratio`.
pub const DEFAULT_HIGH_RATIO: f64 = 0.9;

/// How close a card is to missing its target cycle time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Returns the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ratio boundaries between severities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    medium_ratio: f64,
    high_ratio: f64,
}

impl SeverityThresholds {
    /// Creates thresholds, requiring `0 < medium_ratio < high_ratio`.
    pub fn new(medium_ratio: f64, high_ratio: f64) -> Result<Self, ValidationError> {
        if !medium_ratio.is_finite() || medium_ratio <= 0.0 {
            return Err(ValidationError::not_positive("medium_ratio", 0.0, medium_ratio));
        }
        if !high_ratio.is_finite() || high_ratio <= medium_ratio {
            return Err(ValidationError::invalid_format(
                "high_ratio",
                format!("must be greater than medium_ratio ({medium_ratio}), got {high_ratio}"),
            ));
        }
        Ok(Self {
            medium_ratio,
            high_ratio,
        })
    }

    pub fn medium_ratio(&self) -> f64 {
        self.medium_ratio
    }

    pub fn high_ratio(&self) -> f64 {
        self.high_ratio
    }

    /// Classifies elapsed minutes against a target.
    ///
    /// `target_minutes` must be positive; settings are normalized before they
    /// reach this point.
    pub fn classify(&self, elapsed_minutes: f64, target_minutes: f64) -> Severity {
        let ratio = elapsed_minutes / target_minutes;

        if ratio < self.medium_ratio {
            Severity::Low
        } else if ratio < self.high_ratio {
            Severity::Medium
        } else {
            Severity::High
        }
    }
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            medium_ratio: DEFAULT_MEDIUM_RATIO,
            high_ratio: DEFAULT_HIGH_RATIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_for_one_hour_target() {
        let thresholds = SeverityThresholds::default();

        assert_eq!(thresholds.classify(29.0, 60.0), Severity::Low);
        assert_eq!(thresholds.classify(30.0, 60.0), Severity::Medium);
        assert_eq!(thresholds.classify(31.0, 60.0), Severity::Medium);
        assert_eq!(thresholds.classify(53.9, 60.0), Severity::Medium);
        assert_eq!(thresholds.classify(54.0, 60.0), Severity::High);
        assert_eq!(thresholds.classify(600.0, 60.0), Severity::High);
    }

    #[test]
    fn earlier_high_boundary_can_be_configured() {
        let thresholds = SeverityThresholds::new(0.5, 0.75).unwrap();

        assert_eq!(thresholds.classify(44.0, 60.0), Severity::Medium);
        assert_eq!(thresholds.classify(45.0, 60.0), Severity::High);
    }

    #[test]
    fn new_rejects_inverted_ratios() {
        assert!(SeverityThresholds::new(0.9, 0.5).is_err());
        assert!(SeverityThresholds::new(0.5, 0.5).is_err());
        assert!(SeverityThresholds::new(0.0, 0.5).is_err());
        assert!(SeverityThresholds::new(0.5, f64::INFINITY).is_err());
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "\"medium\"");
    }

    proptest! {
        #[test]
        fn severity_never_decreases_as_time_passes(
            earlier in 0.0f64..10_000.0,
            extra in 0.0f64..10_000.0,
            target in 1.0f64..5_000.0,
        ) {
            let thresholds = SeverityThresholds::default();
            let first = thresholds.classify(earlier, target);
            let second = thresholds.classify(earlier + extra, target);
            prop_assert!(second >= first);
        }
    }
}
