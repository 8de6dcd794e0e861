use crate::history;
use crate::types::kpi::MonthlyKpi;

const ROLLING_WINDOW: usize = 3;

pub fn snapshot_to_markdown(kpi: &MonthlyKpi) -> String {
    let mut output = String::new();
    let subject = if kpi.is_team_row() {
        "team".to_string()
    } else {
        format!("developer {}", kpi.developer_id)
    };
    output.push_str(&format!(
        "# KPI Report — {} — {:04}-{:02}\n\n",
        subject, kpi.year, kpi.month
    ));

    output.push_str("## Scores\n\n");
    output.push_str(&format!(
        "- delivery: {:.1}\n- quality: {:.1}\n- overall: {:.1}\n",
        kpi.delivery_score, kpi.quality_score, kpi.overall_score
    ));
    match kpi.trend {
        Some(trend) => output.push_str(&format!("- trend: {}\n\n", trend.as_str())),
        None => output.push_str("- trend: n/a\n\n"),
    }

    output.push_str("## Tickets\n\n");
    output.push_str(&format!(
        "- assigned: {}\n- completed: {}\n- on time: {}\n- late: {}\n- reopened: {}\n- on-time rate: {:.1}%\n- avg delivery: {:.1} days\n\n",
        kpi.total_tickets,
        kpi.completed_tickets,
        kpi.on_time_tickets,
        kpi.late_tickets,
        kpi.reopened_tickets,
        kpi.on_time_rate,
        kpi.avg_delivery_time
    ));

    output.push_str("## Bugs\n\n");
    output.push_str(&format!(
        "- total: {}\n- developer error: {}\n- conceptual: {}\n- outside control: {}\n",
        kpi.total_bugs, kpi.developer_error_bugs, kpi.conceptual_bugs, kpi.other_bugs
    ));

    output
}

/// Chronological table of stored snapshots plus a trailing rolling mean of
/// the overall score for chart-style reading.
pub fn history_to_markdown(rows: &[MonthlyKpi]) -> String {
    let mut output = String::new();
    output.push_str("# KPI History\n\n");
    if rows.is_empty() {
        output.push_str("- no stored snapshots\n");
        return output;
    }

    output.push_str("| period | delivery | quality | overall | trend |\n");
    output.push_str("|--------|----------|---------|---------|-------|\n");
    for row in rows {
        output.push_str(&format!(
            "| {:04}-{:02} | {:.1} | {:.1} | {:.1} | {} |\n",
            row.year,
            row.month,
            row.delivery_score,
            row.quality_score,
            row.overall_score,
            row.trend.map(|t| t.as_str()).unwrap_or("-")
        ));
    }

    let overall: Vec<f64> = rows.iter().map(|row| row.overall_score).collect();
    let smoothed = history::rolling_mean(&overall, ROLLING_WINDOW);
    output.push_str("\n## Overall (3-period rolling mean)\n\n");
    let series = smoothed
        .iter()
        .map(|value| format!("{value:.1}"))
        .collect::<Vec<_>>()
        .join(" -> ");
    output.push_str(&format!("{series}\n"));

    output
}
