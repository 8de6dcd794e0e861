use crate::types::bug::{Bug, BugType};
use crate::types::config::PenaltyTables;

/// Bug-side metrics for one developer over one period. Membership is by
/// bug creation date; attribution is to the developer who introduced the
/// bug, not whoever fixed it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BugMetrics {
    pub total_bugs: u32,
    pub developer_error_bugs: u32,
    pub conceptual_bugs: u32,
    pub other_bugs: u32,
}

pub fn bug_metrics(bugs: &[Bug]) -> BugMetrics {
    let mut metrics = BugMetrics {
        total_bugs: bugs.len() as u32,
        ..BugMetrics::default()
    };
    for bug in bugs {
        match bug.bug_type {
            BugType::DeveloperError => metrics.developer_error_bugs += 1,
            BugType::Conceptual => metrics.conceptual_bugs += 1,
            _ => metrics.other_bugs += 1,
        }
    }
    metrics
}

/// Starts at 100 and deducts per penalized bug by severity:
/// developer_error bugs from the full-weight table, conceptual bugs from
/// the reduced table, the zero-impact types nothing. Clamped to [0, 100].
pub fn quality_score(bugs: &[Bug], penalties: &PenaltyTables) -> f64 {
    let mut score = 100.0;
    for bug in bugs {
        score -= match bug.bug_type {
            BugType::DeveloperError => penalties.developer_error.for_severity(bug.severity),
            BugType::Conceptual => penalties.conceptual.for_severity(bug.severity),
            _ => 0.0,
        };
    }
    score.clamp(0.0, 100.0)
}
