use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeveloperRole {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl DeveloperRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeveloperRole::Junior => "junior",
            DeveloperRole::Mid => "mid",
            DeveloperRole::Senior => "senior",
            DeveloperRole::Lead => "lead",
        }
    }
}

/// A tracked team member. `is_active` is a soft delete: deactivated
/// developers drop out of current listings and team aggregation but keep
/// every historical ticket, bug and KPI record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: DeveloperRole,
    pub team: Option<String>,
    pub start_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
