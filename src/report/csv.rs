use crate::types::kpi::MonthlyKpi;

const HEADER: &str = "developerId,month,year,totalTickets,completedTickets,onTimeTickets,lateTickets,reopenedTickets,onTimeRate,avgDeliveryTime,totalBugs,developerErrorBugs,conceptualBugs,otherBugs,deliveryScore,qualityScore,overallScore,trend,generatedAt";

/// Tabular rendering of snapshot rows; formatting only, no scoring logic.
pub fn to_csv(rows: &[MonthlyKpi]) -> String {
    let mut output = String::new();
    output.push_str(HEADER);
    output.push('\n');
    for row in rows {
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{},{:.2},{:.2},{},{},{},{},{:.2},{:.2},{:.2},{},{}\n",
            escape(&row.developer_id),
            row.month,
            row.year,
            row.total_tickets,
            row.completed_tickets,
            row.on_time_tickets,
            row.late_tickets,
            row.reopened_tickets,
            row.on_time_rate,
            row.avg_delivery_time,
            row.total_bugs,
            row.developer_error_bugs,
            row.conceptual_bugs,
            row.other_bugs,
            row.delivery_score,
            row.quality_score,
            row.overall_score,
            row.trend.map(|trend| trend.as_str()).unwrap_or(""),
            row.generated_at.to_rfc3339(),
        ));
    }
    output
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
