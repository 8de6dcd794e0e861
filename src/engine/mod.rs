pub mod delivery;
pub mod quality;
pub mod trend;

use crate::error::{KpiError, Result};
use crate::history;
use crate::store::WorkspaceStore;
use crate::types::config::KpiConfig;
use crate::types::kpi::{MonthlyKpi, Period};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Compute a developer's snapshot for a period from a read snapshot of
/// the store. Zero activity is a valid all-zero KPI, not an error.
pub fn compute_snapshot(
    store: &WorkspaceStore,
    config: &KpiConfig,
    developer_id: &str,
    period: Period,
) -> Result<MonthlyKpi> {
    store.developer(developer_id)?;

    let tickets = store.tickets_for_developer_in_period(developer_id, period);
    let bugs = store.bugs_for_developer_in_period(developer_id, period);

    let ticket_metrics = delivery::ticket_metrics(&tickets);
    let bug_metrics = quality::bug_metrics(&bugs);

    let delivery_score = delivery::delivery_score(&ticket_metrics, config.scoring.reopen_penalty);
    let quality_score = quality::quality_score(&bugs, &config.penalties);
    let overall_score = overall_score(delivery_score, quality_score, config);

    let prior = history::overall_series_before(&store.historical_kpis(developer_id), developer_id, period);
    let trend = trend::classify(&prior, config.scoring.trend_threshold);

    debug!(
        developer = developer_id,
        period = %period,
        delivery = delivery_score,
        quality = quality_score,
        overall = overall_score,
        "snapshot computed"
    );

    Ok(MonthlyKpi {
        id: Uuid::new_v4().to_string(),
        developer_id: developer_id.to_string(),
        month: period.month,
        year: period.year,
        total_tickets: ticket_metrics.total_tickets,
        completed_tickets: ticket_metrics.completed_tickets,
        on_time_tickets: ticket_metrics.on_time_tickets,
        late_tickets: ticket_metrics.late_tickets,
        reopened_tickets: ticket_metrics.reopened_tickets,
        on_time_rate: ticket_metrics.on_time_rate,
        avg_delivery_time: ticket_metrics.avg_delivery_time,
        total_bugs: bug_metrics.total_bugs,
        developer_error_bugs: bug_metrics.developer_error_bugs,
        conceptual_bugs: bug_metrics.conceptual_bugs,
        other_bugs: bug_metrics.other_bugs,
        delivery_score,
        quality_score,
        overall_score,
        trend,
        generated_at: Utc::now(),
    })
}

/// Weighted combination with defensive normalization: a drifted weight
/// pair still lands in [0, 100].
pub fn overall_score(delivery_score: f64, quality_score: f64, config: &KpiConfig) -> f64 {
    let (delivery_weight, quality_weight) = config.normalized_weights();
    (delivery_score * delivery_weight + quality_score * quality_weight).clamp(0.0, 100.0)
}

/// Compute, persist and return a developer's snapshot for the period.
pub fn generate_monthly_kpi(
    store: &mut WorkspaceStore,
    config: &KpiConfig,
    developer_id: &str,
    period: Period,
) -> Result<MonthlyKpi> {
    let snapshot = compute_snapshot(store, config, developer_id, period)?;
    store.upsert_snapshot(snapshot.clone());
    info!(developer = developer_id, period = %period, "monthly KPI generated");
    Ok(snapshot)
}

/// Live preview for the current system month; nothing is persisted.
pub fn preview_current_month(
    store: &WorkspaceStore,
    config: &KpiConfig,
    developer_id: &str,
) -> Result<MonthlyKpi> {
    compute_snapshot(store, config, developer_id, Period::current())
}

/// Generate the team aggregate for a period: every active developer's
/// snapshot is computed concurrently over the shared read snapshot, then
/// persisted by the single writer together with the `"all"` row. A
/// developer whose computation fails, or who had no activity, is excluded;
/// with no contributors at all the aggregate is absent and surfaced as
/// [`KpiError::AggregateFailure`].
pub fn generate_team_kpi(
    store: &mut WorkspaceStore,
    config: &KpiConfig,
    period: Period,
) -> Result<MonthlyKpi> {
    let developer_ids: Vec<String> = store
        .active_developers()
        .iter()
        .map(|dev| dev.id.clone())
        .collect();

    let shared: &WorkspaceStore = store;
    let results: Vec<(String, Result<MonthlyKpi>)> = std::thread::scope(|scope| {
        let handles: Vec<_> = developer_ids
            .iter()
            .map(|id| {
                (
                    id.clone(),
                    scope.spawn(move || compute_snapshot(shared, config, id, period)),
                )
            })
            .collect();
        handles
            .into_iter()
            .map(|(id, handle)| match handle.join() {
                Ok(result) => (id, result),
                Err(_) => (
                    id.clone(),
                    Err(KpiError::DatasetParse(format!(
                        "KPI worker panicked for developer {id}"
                    ))),
                ),
            })
            .collect()
    });

    let mut contributing = Vec::new();
    for (id, result) in results {
        match result {
            Ok(snapshot) if snapshot.total_tickets == 0 && snapshot.total_bugs == 0 => {
                debug!(developer = %id, period = %period, "no activity, excluded from team aggregate");
            }
            Ok(snapshot) => contributing.push(snapshot),
            Err(error) => {
                warn!(developer = %id, %error, "excluded from team aggregate");
            }
        }
    }

    let aggregate = history::aggregate_team(period, &contributing).ok_or(
        KpiError::AggregateFailure {
            month: period.month,
            year: period.year,
        },
    )?;

    let contributors = contributing.len();
    for snapshot in contributing {
        store.upsert_snapshot(snapshot);
    }
    store.upsert_snapshot(aggregate.clone());
    info!(period = %period, contributors, "team KPI generated");
    Ok(aggregate)
}
