use crate::error::KpiError;
use crate::types::bug::BugSeverity;
use serde::Deserialize;

const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KpiConfig {
    pub scoring: ScoringConfig,
    pub penalties: PenaltyTables,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub delivery_weight: f64,
    pub quality_weight: f64,
    /// Points deducted from the delivery score per reopened ticket.
    /// Deliberately configurable; the default is a placeholder pending
    /// product calibration.
    pub reopen_penalty: f64,
    /// Half-width of the "stable" band when classifying a trend.
    pub trend_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            delivery_weight: 0.5,
            quality_weight: 0.5,
            reopen_penalty: 5.0,
            trend_threshold: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PenaltyTables {
    /// Full-weight deductions for coding mistakes.
    pub developer_error: SeverityPenalties,
    /// Reduced deductions for design-level mistakes. The default ratio is
    /// 50% of developer_error, a placeholder pending product
    /// clarification.
    pub conceptual: SeverityPenalties,
}

impl Default for PenaltyTables {
    fn default() -> Self {
        PenaltyTables {
            developer_error: SeverityPenalties {
                critical: 15.0,
                high: 10.0,
                medium: 5.0,
                low: 2.0,
            },
            conceptual: SeverityPenalties {
                critical: 7.5,
                high: 5.0,
                medium: 2.5,
                low: 1.0,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeverityPenalties {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl SeverityPenalties {
    pub fn for_severity(&self, severity: BugSeverity) -> f64 {
        match severity {
            BugSeverity::Critical => self.critical,
            BugSeverity::High => self.high,
            BugSeverity::Medium => self.medium,
            BugSeverity::Low => self.low,
        }
    }

    fn validate(&self, table: &str) -> Result<(), KpiError> {
        for (name, value) in [
            ("critical", self.critical),
            ("high", self.high),
            ("medium", self.medium),
            ("low", self.low),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(KpiError::InvalidConfig(format!(
                    "penalties.{table}.{name} must be a non-negative number (found {value})"
                )));
            }
        }
        Ok(())
    }
}

impl KpiConfig {
    /// Boundary validation for config edits. The scorer does not rely on
    /// this having run: see [`KpiConfig::normalized_weights`].
    pub fn validate(&self) -> Result<(), KpiError> {
        for (name, weight) in [
            ("delivery_weight", self.scoring.delivery_weight),
            ("quality_weight", self.scoring.quality_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(KpiError::InvalidConfig(format!(
                    "scoring.{name} must be between 0.0 and 1.0 (found {weight})"
                )));
            }
        }

        let sum = self.scoring.delivery_weight + self.scoring.quality_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(KpiError::InvalidConfig(format!(
                "scoring weights must sum to 1.0 (found {sum:.3})"
            )));
        }

        if !self.scoring.reopen_penalty.is_finite() || self.scoring.reopen_penalty < 0.0 {
            return Err(KpiError::InvalidConfig(
                "scoring.reopen_penalty must be a non-negative number".to_string(),
            ));
        }
        if !self.scoring.trend_threshold.is_finite() || self.scoring.trend_threshold < 0.0 {
            return Err(KpiError::InvalidConfig(
                "scoring.trend_threshold must be a non-negative number".to_string(),
            ));
        }

        self.penalties.developer_error.validate("developer_error")?;
        self.penalties.conceptual.validate("conceptual")?;
        Ok(())
    }

    /// Weights re-normalized by their sum so a drifted configuration still
    /// combines to a value in [0, 100]. A ~zero sum falls back to the
    /// 50/50 default split.
    pub fn normalized_weights(&self) -> (f64, f64) {
        let sum = self.scoring.delivery_weight + self.scoring.quality_weight;
        if !sum.is_finite() || sum.abs() < WEIGHT_SUM_TOLERANCE {
            return (0.5, 0.5);
        }
        (
            self.scoring.delivery_weight / sum,
            self.scoring.quality_weight / sum,
        )
    }
}
