use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BugSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            BugSeverity::Low => "low",
            BugSeverity::Medium => "medium",
            BugSeverity::High => "high",
            BugSeverity::Critical => "critical",
        }
    }
}

/// The classification is the fairness mechanism: only bugs a developer
/// could have prevented carry a penalty. `requirement_change`,
/// `environment` and `third_party` bugs are recorded but never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BugType {
    DeveloperError,
    Conceptual,
    RequirementChange,
    Environment,
    ThirdParty,
}

impl BugType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BugType::DeveloperError => "developer_error",
            BugType::Conceptual => "conceptual",
            BugType::RequirementChange => "requirement_change",
            BugType::Environment => "environment",
            BugType::ThirdParty => "third_party",
        }
    }

    pub fn penalized(&self) -> bool {
        matches!(self, BugType::DeveloperError | BugType::Conceptual)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bug {
    pub id: String,
    /// The ticket in which the bug was discovered.
    pub ticket_id: String,
    /// The developer who introduced the bug. Penalties attribute here,
    /// never to whoever fixed it.
    pub developer_id: String,
    #[serde(default)]
    pub reported_by: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub severity: BugSeverity,
    pub bug_type: BugType,
    #[serde(default)]
    pub is_resolved: bool,
    #[serde(default)]
    pub resolved_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolved_by_developer_id: Option<String>,
    /// A separate ticket created to perform the fix, if any.
    #[serde(default)]
    pub fix_ticket_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
