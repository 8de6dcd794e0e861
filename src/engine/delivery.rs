use crate::types::ticket::Ticket;

/// Ticket-side metrics for one developer over one period. The input
/// population is every ticket *assigned* in the period; completion date
/// plays no part in membership.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TicketMetrics {
    pub total_tickets: u32,
    pub completed_tickets: u32,
    pub on_time_tickets: u32,
    pub late_tickets: u32,
    pub reopened_tickets: u32,
    pub on_time_rate: f64,
    pub avg_delivery_time: f64,
}

pub fn ticket_metrics(tickets: &[Ticket]) -> TicketMetrics {
    let mut metrics = TicketMetrics {
        total_tickets: tickets.len() as u32,
        ..TicketMetrics::default()
    };
    let mut delivery_days = 0.0;

    for ticket in tickets {
        if ticket.is_completed() {
            metrics.completed_tickets += 1;
            if ticket.is_on_time() {
                metrics.on_time_tickets += 1;
            } else {
                metrics.late_tickets += 1;
            }
            if let Some(completed) = ticket.completed_date {
                delivery_days +=
                    (completed - ticket.assigned_date).num_seconds() as f64 / 86_400.0;
            }
        }
        // Reopens count over the whole period population, completed or not.
        if ticket.reopen_count > 0 {
            metrics.reopened_tickets += 1;
        }
    }

    if metrics.completed_tickets > 0 {
        let completed = metrics.completed_tickets as f64;
        metrics.on_time_rate = metrics.on_time_tickets as f64 / completed * 100.0;
        metrics.avg_delivery_time = delivery_days / completed;
    }

    metrics
}

/// On-time rate reduced by a per-reopen rework penalty, clamped to
/// [0, 100]. With nothing completed the rate is 0, so the score is too.
pub fn delivery_score(metrics: &TicketMetrics, reopen_penalty: f64) -> f64 {
    let score = metrics.on_time_rate - metrics.reopened_tickets as f64 * reopen_penalty;
    score.clamp(0.0, 100.0)
}
