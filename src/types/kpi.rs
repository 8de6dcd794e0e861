use crate::error::{KpiError, Result};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel developer id carried by team aggregate rows.
pub const TEAM_DEVELOPER_ID: &str = "all";

/// A (month, year) aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(KpiError::InvalidPeriod(month));
        }
        Ok(Period { year, month })
    }

    pub fn current() -> Self {
        let now = Utc::now();
        Period {
            year: now.year(),
            month: now.month(),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at.year() == self.year && at.month() == self.month
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiTrend {
    Improving,
    Stable,
    Declining,
}

impl KpiTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            KpiTrend::Improving => "improving",
            KpiTrend::Stable => "stable",
            KpiTrend::Declining => "declining",
        }
    }
}

/// A persisted per-developer per-period KPI snapshot. Team aggregate rows
/// use the `"all"` sentinel id and never carry a trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyKpi {
    pub id: String,
    pub developer_id: String,
    pub month: u32,
    pub year: i32,

    // Ticket metrics
    pub total_tickets: u32,
    pub completed_tickets: u32,
    pub on_time_tickets: u32,
    pub late_tickets: u32,
    pub reopened_tickets: u32,

    // Time metrics
    pub on_time_rate: f64,
    pub avg_delivery_time: f64,

    // Bug metrics
    pub total_bugs: u32,
    pub developer_error_bugs: u32,
    pub conceptual_bugs: u32,
    pub other_bugs: u32,

    // Scores, all in [0, 100]
    pub delivery_score: f64,
    pub quality_score: f64,
    pub overall_score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<KpiTrend>,

    pub generated_at: DateTime<Utc>,
}

impl MonthlyKpi {
    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }

    pub fn is_team_row(&self) -> bool {
        self.developer_id == TEAM_DEVELOPER_ID
    }
}
