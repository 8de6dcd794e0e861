use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Assigned,
    InProgress,
    Review,
    Completed,
    Reopened,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Assigned => "assigned",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Review => "review",
            TicketStatus::Completed => "completed",
            TicketStatus::Reopened => "reopened",
        }
    }

    /// The workflow graph. `completed` has no forward edge here; leaving
    /// it requires the explicit reopen action, which is tracked separately
    /// from a plain status edit.
    pub fn can_transition(&self, to: TicketStatus) -> bool {
        use TicketStatus::*;
        matches!(
            (*self, to),
            (Assigned, InProgress)
                | (InProgress, Review)
                | (InProgress, Assigned)
                | (Review, Completed)
                | (Review, InProgress)
                | (Reopened, InProgress)
        )
    }
}

/// Informational only; complexity does not feed the scoring formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketComplexity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// The single developer accountable for delivery.
    pub developer_id: String,
    pub assigned_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
    pub status: TicketStatus,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    /// Accumulates additively across repeated completion calls.
    #[serde(default)]
    pub actual_hours: Option<f64>,
    pub complexity: TicketComplexity,
    #[serde(default)]
    pub reopen_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Completed purely from status + timestamp; the scorer enforces no
    /// other precondition.
    pub fn is_completed(&self) -> bool {
        self.status == TicketStatus::Completed && self.completed_date.is_some()
    }

    /// Full-timestamp comparison, not date-only.
    pub fn is_on_time(&self) -> bool {
        self.completed_date
            .map(|completed| completed <= self.due_date)
            .unwrap_or(false)
    }
}
