use super::WorkspaceStore;
use crate::error::{KpiError, Result};
use crate::types::bug::{Bug, BugType};
use crate::types::ticket::{Ticket, TicketStatus};
use chrono::{DateTime, Utc};
use tracing::debug;

impl WorkspaceStore {
    /// Complete a ticket, adding the logged hours to `actual_hours`.
    /// Repeated calls accumulate hours additively and overwrite
    /// `completed_date` with the latest timestamp; the edit boundary only
    /// admits tickets in review (or already completed).
    pub fn complete_ticket(
        &mut self,
        id: &str,
        hours: Option<f64>,
        at: Option<DateTime<Utc>>,
    ) -> Result<Ticket> {
        let now = at.unwrap_or_else(Utc::now);
        let ticket = self.ticket_mut(id)?;

        if !matches!(ticket.status, TicketStatus::Review | TicketStatus::Completed) {
            return Err(KpiError::InvalidTransition {
                from: ticket.status.as_str().to_string(),
                to: TicketStatus::Completed.as_str().to_string(),
            });
        }

        ticket.status = TicketStatus::Completed;
        ticket.completed_date = Some(now);
        if let Some(hours) = hours {
            ticket.actual_hours = Some(ticket.actual_hours.unwrap_or(0.0) + hours);
        }
        ticket.updated_at = now;
        debug!(ticket = id, hours, "ticket completed");
        Ok(ticket.clone())
    }

    /// Reopen a completed ticket. Tracked separately from a status edit:
    /// every call bumps `reopen_count` by exactly one, which the delivery
    /// score treats as rework.
    pub fn reopen_ticket(&mut self, id: &str) -> Result<Ticket> {
        let ticket = self.ticket_mut(id)?;
        if ticket.status != TicketStatus::Completed {
            return Err(KpiError::InvalidTransition {
                from: ticket.status.as_str().to_string(),
                to: TicketStatus::Reopened.as_str().to_string(),
            });
        }
        ticket.status = TicketStatus::Reopened;
        ticket.reopen_count += 1;
        ticket.updated_at = Utc::now();
        debug!(ticket = id, reopen_count = ticket.reopen_count, "ticket reopened");
        Ok(ticket.clone())
    }

    /// Plain status edit, guarded by the workflow graph. Completion this
    /// way leaves `completed_date` unset, so the scorer will not count it;
    /// use [`WorkspaceStore::complete_ticket`] to finish work.
    pub fn set_ticket_status(&mut self, id: &str, to: TicketStatus) -> Result<Ticket> {
        let ticket = self.ticket_mut(id)?;
        if !ticket.status.can_transition(to) {
            return Err(KpiError::InvalidTransition {
                from: ticket.status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }
        ticket.status = to;
        ticket.updated_at = Utc::now();
        Ok(ticket.clone())
    }

    /// Resolve a bug. When a resolver and fix hours are both supplied and
    /// a fix ticket is linked, the fix ticket's `actual_hours` is
    /// incremented by the given hours.
    pub fn resolve_bug(
        &mut self,
        id: &str,
        resolved_by: Option<&str>,
        fix_ticket_id: Option<&str>,
        fix_hours: Option<f64>,
        at: Option<DateTime<Utc>>,
    ) -> Result<Bug> {
        if let Some(fix_id) = fix_ticket_id {
            if !self.data.tickets.iter().any(|ticket| ticket.id == fix_id) {
                return Err(KpiError::TicketNotFound(fix_id.to_string()));
            }
        }

        let now = at.unwrap_or_else(Utc::now);
        let bug = self.bug_mut(id)?;
        bug.is_resolved = true;
        bug.resolved_date = Some(now);
        if let Some(resolver) = resolved_by {
            bug.resolved_by_developer_id = Some(resolver.to_string());
        }
        if let Some(fix_id) = fix_ticket_id {
            bug.fix_ticket_id = Some(fix_id.to_string());
        }
        bug.updated_at = now;
        let resolved = bug.clone();

        if resolved_by.is_some() {
            if let (Some(fix_id), Some(hours)) = (resolved.fix_ticket_id.clone(), fix_hours) {
                let fix_ticket = self.ticket_mut(&fix_id)?;
                fix_ticket.actual_hours = Some(fix_ticket.actual_hours.unwrap_or(0.0) + hours);
                fix_ticket.updated_at = now;
                debug!(bug = id, fix_ticket = %fix_id, hours, "fix hours booked");
            }
        }

        Ok(resolved)
    }

    /// Change a bug's classification. A no-op when the type is unchanged;
    /// otherwise retroactive: the next computation reflects it.
    pub fn reclassify_bug(&mut self, id: &str, bug_type: BugType) -> Result<bool> {
        let bug = self.bug_mut(id)?;
        if bug.bug_type == bug_type {
            return Ok(false);
        }
        debug!(bug = id, from = bug.bug_type.as_str(), to = bug_type.as_str(), "bug reclassified");
        bug.bug_type = bug_type;
        bug.updated_at = Utc::now();
        Ok(true)
    }

    /// Soft delete: the developer leaves current listings and team
    /// aggregation, keeping every ticket, bug and KPI record.
    pub fn deactivate_developer(&mut self, id: &str) -> Result<()> {
        let developer = self.developer_mut(id)?;
        developer.is_active = false;
        developer.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::*;
    use crate::types::bug::BugSeverity;

    #[test]
    fn complete_accumulates_hours_and_keeps_latest_timestamp() {
        let mut store = store_with(
            vec![developer("dev-1", true)],
            vec![ticket(
                "t1",
                "dev-1",
                TicketStatus::Review,
                at(2025, 3, 1),
                at(2025, 3, 10),
                None,
            )],
            Vec::new(),
        );

        let first = store
            .complete_ticket("t1", Some(4.0), Some(at(2025, 3, 8)))
            .expect("first completion should succeed");
        assert_eq!(first.actual_hours, Some(4.0));
        assert_eq!(first.completed_date, Some(at(2025, 3, 8)));

        let second = store
            .complete_ticket("t1", Some(2.5), Some(at(2025, 3, 9)))
            .expect("repeat completion should succeed");
        assert_eq!(second.actual_hours, Some(6.5));
        assert_eq!(second.completed_date, Some(at(2025, 3, 9)));
    }

    #[test]
    fn complete_rejects_unreviewed_ticket() {
        let mut store = store_with(
            vec![developer("dev-1", true)],
            vec![ticket(
                "t1",
                "dev-1",
                TicketStatus::InProgress,
                at(2025, 3, 1),
                at(2025, 3, 10),
                None,
            )],
            Vec::new(),
        );
        let err = store
            .complete_ticket("t1", None, None)
            .expect_err("completion from in_progress should fail");
        assert!(matches!(err, KpiError::InvalidTransition { .. }));
    }

    #[test]
    fn reopen_increments_count_once_per_call() {
        let mut store = store_with(
            vec![developer("dev-1", true)],
            vec![ticket(
                "t1",
                "dev-1",
                TicketStatus::Completed,
                at(2025, 3, 1),
                at(2025, 3, 10),
                Some(at(2025, 3, 9)),
            )],
            Vec::new(),
        );

        let reopened = store.reopen_ticket("t1").expect("reopen should succeed");
        assert_eq!(reopened.status, TicketStatus::Reopened);
        assert_eq!(reopened.reopen_count, 1);

        // Workflow resumes, completes, reopens again.
        store
            .set_ticket_status("t1", TicketStatus::InProgress)
            .expect("resume should succeed");
        store
            .set_ticket_status("t1", TicketStatus::Review)
            .expect("review should succeed");
        store
            .complete_ticket("t1", None, None)
            .expect("completion should succeed");
        let again = store.reopen_ticket("t1").expect("second reopen should succeed");
        assert_eq!(again.reopen_count, 2);
    }

    #[test]
    fn reopen_requires_completed_status() {
        let mut store = store_with(
            vec![developer("dev-1", true)],
            vec![ticket(
                "t1",
                "dev-1",
                TicketStatus::Review,
                at(2025, 3, 1),
                at(2025, 3, 10),
                None,
            )],
            Vec::new(),
        );
        assert!(store.reopen_ticket("t1").is_err());
    }

    #[test]
    fn status_edit_rejects_off_graph_moves() {
        let mut store = store_with(
            vec![developer("dev-1", true)],
            vec![ticket(
                "t1",
                "dev-1",
                TicketStatus::Assigned,
                at(2025, 3, 1),
                at(2025, 3, 10),
                None,
            )],
            Vec::new(),
        );
        let err = store
            .set_ticket_status("t1", TicketStatus::Completed)
            .expect_err("assigned -> completed should fail");
        assert!(err.to_string().contains("assigned -> completed"));
    }

    #[test]
    fn resolve_books_fix_hours_onto_the_fix_ticket() {
        let mut fix = ticket(
            "fix-1",
            "dev-2",
            TicketStatus::InProgress,
            at(2025, 3, 3),
            at(2025, 3, 12),
            None,
        );
        fix.actual_hours = Some(4.0);
        let mut store = store_with(
            vec![developer("dev-1", true), developer("dev-2", true)],
            vec![fix],
            vec![bug(
                "b1",
                "dev-1",
                BugSeverity::High,
                BugType::DeveloperError,
                at(2025, 3, 5),
            )],
        );

        let resolved = store
            .resolve_bug("b1", Some("dev-2"), Some("fix-1"), Some(2.5), Some(at(2025, 3, 7)))
            .expect("resolve should succeed");
        assert!(resolved.is_resolved);
        assert_eq!(resolved.resolved_date, Some(at(2025, 3, 7)));
        assert_eq!(resolved.resolved_by_developer_id.as_deref(), Some("dev-2"));

        let fix = store
            .tickets()
            .iter()
            .find(|ticket| ticket.id == "fix-1")
            .expect("fix ticket should exist");
        assert_eq!(fix.actual_hours, Some(6.5));
    }

    #[test]
    fn resolve_without_resolver_leaves_fix_hours_alone() {
        let mut store = store_with(
            vec![developer("dev-1", true)],
            vec![ticket(
                "fix-1",
                "dev-1",
                TicketStatus::InProgress,
                at(2025, 3, 3),
                at(2025, 3, 12),
                None,
            )],
            vec![bug(
                "b1",
                "dev-1",
                BugSeverity::Low,
                BugType::Conceptual,
                at(2025, 3, 5),
            )],
        );

        store
            .resolve_bug("b1", None, Some("fix-1"), Some(2.5), None)
            .expect("resolve should succeed");
        let fix = store
            .tickets()
            .iter()
            .find(|ticket| ticket.id == "fix-1")
            .expect("fix ticket should exist");
        assert_eq!(fix.actual_hours, None);
    }

    #[test]
    fn resolve_rejects_unknown_fix_ticket() {
        let mut store = store_with(
            vec![developer("dev-1", true)],
            Vec::new(),
            vec![bug(
                "b1",
                "dev-1",
                BugSeverity::Low,
                BugType::DeveloperError,
                at(2025, 3, 5),
            )],
        );
        let err = store
            .resolve_bug("b1", Some("dev-2"), Some("missing"), Some(1.0), None)
            .expect_err("resolve should fail");
        assert!(matches!(err, KpiError::TicketNotFound(_)));
    }

    #[test]
    fn reclassify_is_a_no_op_for_the_same_type() {
        let mut store = store_with(
            vec![developer("dev-1", true)],
            Vec::new(),
            vec![bug(
                "b1",
                "dev-1",
                BugSeverity::High,
                BugType::DeveloperError,
                at(2025, 3, 5),
            )],
        );
        let before = store.bugs()[0].updated_at;

        let changed = store
            .reclassify_bug("b1", BugType::DeveloperError)
            .expect("reclassify should succeed");
        assert!(!changed);
        assert_eq!(store.bugs()[0].updated_at, before);

        let changed = store
            .reclassify_bug("b1", BugType::RequirementChange)
            .expect("reclassify should succeed");
        assert!(changed);
        assert_eq!(store.bugs()[0].bug_type, BugType::RequirementChange);
    }

    #[test]
    fn deactivate_keeps_records_intact() {
        let mut store = store_with(
            vec![developer("dev-1", true)],
            vec![ticket(
                "t1",
                "dev-1",
                TicketStatus::Assigned,
                at(2025, 3, 1),
                at(2025, 3, 10),
                None,
            )],
            vec![bug(
                "b1",
                "dev-1",
                BugSeverity::Low,
                BugType::Conceptual,
                at(2025, 3, 5),
            )],
        );

        store
            .deactivate_developer("dev-1")
            .expect("deactivate should succeed");
        assert!(!store.developers()[0].is_active);
        assert_eq!(store.tickets().len(), 1);
        assert_eq!(store.bugs().len(), 1);
        assert!(store.active_developers().is_empty());
    }
}
