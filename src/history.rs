use crate::types::kpi::{MonthlyKpi, Period, TEAM_DEVELOPER_ID};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

/// Insert or replace the row for the snapshot's (developer, month, year)
/// key. Regeneration overwrites; history length per key stays 1.
pub fn upsert(history: &mut Vec<MonthlyKpi>, snapshot: MonthlyKpi) {
    match history.iter_mut().find(|existing| {
        existing.developer_id == snapshot.developer_id
            && existing.month == snapshot.month
            && existing.year == snapshot.year
    }) {
        Some(existing) => {
            debug!(
                developer = %snapshot.developer_id,
                period = %snapshot.period(),
                "snapshot regenerated"
            );
            *existing = snapshot;
        }
        None => history.push(snapshot),
    }
}

/// A developer's snapshots in chronological order, oldest first.
pub fn sorted_history(history: &[MonthlyKpi], developer_id: &str) -> Vec<MonthlyKpi> {
    let mut rows: Vec<MonthlyKpi> = history
        .iter()
        .filter(|kpi| kpi.developer_id == developer_id)
        .cloned()
        .collect();
    rows.sort_by_key(|kpi| kpi.period());
    rows
}

/// Overall scores from periods strictly earlier than `period`, oldest
/// first. This is the trend classifier's input: the row being regenerated
/// never feeds its own trend.
pub fn overall_series_before(
    history: &[MonthlyKpi],
    developer_id: &str,
    period: Period,
) -> Vec<f64> {
    sorted_history(history, developer_id)
        .into_iter()
        .filter(|kpi| kpi.period() < period)
        .map(|kpi| kpi.overall_score)
        .collect()
}

/// Trailing-window means for chart smoothing. Windows shorter than
/// `window` at the head use what is available.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    (0..values.len())
        .map(|end| {
            let start = (end + 1).saturating_sub(window);
            let slice = &values[start..=end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Average per-developer snapshots into the team row for a period: count
/// fields are summed, rate-like fields are arithmetic means. The team row
/// carries the `"all"` sentinel and never a trend. Returns `None` when no
/// snapshot contributes.
pub fn aggregate_team(period: Period, snapshots: &[MonthlyKpi]) -> Option<MonthlyKpi> {
    if snapshots.is_empty() {
        return None;
    }
    let n = snapshots.len() as f64;

    let mut row = MonthlyKpi {
        id: Uuid::new_v4().to_string(),
        developer_id: TEAM_DEVELOPER_ID.to_string(),
        month: period.month,
        year: period.year,
        total_tickets: 0,
        completed_tickets: 0,
        on_time_tickets: 0,
        late_tickets: 0,
        reopened_tickets: 0,
        on_time_rate: 0.0,
        avg_delivery_time: 0.0,
        total_bugs: 0,
        developer_error_bugs: 0,
        conceptual_bugs: 0,
        other_bugs: 0,
        delivery_score: 0.0,
        quality_score: 0.0,
        overall_score: 0.0,
        trend: None,
        generated_at: Utc::now(),
    };

    for snapshot in snapshots {
        row.total_tickets += snapshot.total_tickets;
        row.completed_tickets += snapshot.completed_tickets;
        row.on_time_tickets += snapshot.on_time_tickets;
        row.late_tickets += snapshot.late_tickets;
        row.reopened_tickets += snapshot.reopened_tickets;
        row.total_bugs += snapshot.total_bugs;
        row.developer_error_bugs += snapshot.developer_error_bugs;
        row.conceptual_bugs += snapshot.conceptual_bugs;
        row.other_bugs += snapshot.other_bugs;

        row.on_time_rate += snapshot.on_time_rate / n;
        row.avg_delivery_time += snapshot.avg_delivery_time / n;
        row.delivery_score += snapshot.delivery_score / n;
        row.quality_score += snapshot.quality_score / n;
        row.overall_score += snapshot.overall_score / n;
    }

    Some(row)
}
