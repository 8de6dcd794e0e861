pub mod actions;

use crate::error::{KpiError, Result};
use crate::history;
use crate::types::bug::Bug;
use crate::types::developer::Developer;
use crate::types::kpi::{MonthlyKpi, Period};
use crate::types::ticket::Ticket;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const TEAM_DATA_FILE: &str = "team.json";
pub const HISTORY_FILE: &str = "kpi_history.json";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamData {
    #[serde(default)]
    developers: Vec<Developer>,
    #[serde(default)]
    tickets: Vec<Ticket>,
    #[serde(default)]
    bugs: Vec<Bug>,
}

/// The workspace-backed data provider: `team.json` holds developers,
/// tickets and bugs; `kpi_history.json` holds persisted snapshots.
/// Queries serve read snapshots; mutations go through [`actions`] and are
/// persisted with [`WorkspaceStore::save`].
#[derive(Debug)]
pub struct WorkspaceStore {
    root: PathBuf,
    data: TeamData,
    history: Vec<MonthlyKpi>,
}

impl WorkspaceStore {
    pub fn open(root: &Path) -> Result<Self> {
        let data_path = root.join(TEAM_DATA_FILE);
        if !data_path.exists() {
            return Err(KpiError::DatasetNotFound(data_path.display().to_string()));
        }
        let data: TeamData = read_json(&data_path)?;

        let history_path = root.join(HISTORY_FILE);
        let history: Vec<MonthlyKpi> = if history_path.exists() {
            read_json(&history_path)?
        } else {
            Vec::new()
        };

        debug!(
            developers = data.developers.len(),
            tickets = data.tickets.len(),
            bugs = data.bugs.len(),
            snapshots = history.len(),
            "workspace loaded"
        );

        Ok(WorkspaceStore {
            root: root.to_path_buf(),
            data,
            history,
        })
    }

    pub fn save(&self) -> Result<()> {
        write_json(&self.root.join(TEAM_DATA_FILE), &self.data)?;
        write_json(&self.root.join(HISTORY_FILE), &self.history)?;
        debug!(root = %self.root.display(), "workspace saved");
        Ok(())
    }

    pub fn developer(&self, id: &str) -> Result<&Developer> {
        self.data
            .developers
            .iter()
            .find(|dev| dev.id == id)
            .ok_or_else(|| KpiError::DeveloperNotFound(id.to_string()))
    }

    pub fn developers(&self) -> &[Developer] {
        &self.data.developers
    }

    pub fn active_developers(&self) -> Vec<&Developer> {
        self.data
            .developers
            .iter()
            .filter(|dev| dev.is_active)
            .collect()
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.data.tickets
    }

    pub fn bugs(&self) -> &[Bug] {
        &self.data.bugs
    }

    /// Period membership is by assignment date: a ticket assigned in March
    /// and completed in April belongs to March.
    pub fn tickets_for_developer_in_period(&self, developer_id: &str, period: Period) -> Vec<Ticket> {
        self.data
            .tickets
            .iter()
            .filter(|ticket| {
                ticket.developer_id == developer_id && period.contains(ticket.assigned_date)
            })
            .cloned()
            .collect()
    }

    /// Bugs attributed to the developer, by creation date.
    pub fn bugs_for_developer_in_period(&self, developer_id: &str, period: Period) -> Vec<Bug> {
        self.data
            .bugs
            .iter()
            .filter(|bug| bug.developer_id == developer_id && period.contains(bug.created_at))
            .cloned()
            .collect()
    }

    /// All stored snapshots for a developer, in no particular order.
    pub fn historical_kpis(&self, developer_id: &str) -> Vec<MonthlyKpi> {
        self.history
            .iter()
            .filter(|kpi| kpi.developer_id == developer_id)
            .cloned()
            .collect()
    }

    /// One row per (developer, month, year); regeneration overwrites.
    pub fn upsert_snapshot(&mut self, snapshot: MonthlyKpi) {
        history::upsert(&mut self.history, snapshot);
    }

    pub(crate) fn ticket_mut(&mut self, id: &str) -> Result<&mut Ticket> {
        self.data
            .tickets
            .iter_mut()
            .find(|ticket| ticket.id == id)
            .ok_or_else(|| KpiError::TicketNotFound(id.to_string()))
    }

    pub(crate) fn bug_mut(&mut self, id: &str) -> Result<&mut Bug> {
        self.data
            .bugs
            .iter_mut()
            .find(|bug| bug.id == id)
            .ok_or_else(|| KpiError::BugNotFound(id.to_string()))
    }

    pub(crate) fn developer_mut(&mut self, id: &str) -> Result<&mut Developer> {
        self.data
            .developers
            .iter_mut()
            .find(|dev| dev.id == id)
            .ok_or_else(|| KpiError::DeveloperNotFound(id.to_string()))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| KpiError::DatasetParse(format!("{}: {}", path.display(), e)))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(KpiError::Io)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::types::bug::{BugSeverity, BugType};
    use crate::types::ticket::TicketStatus;
    use tempfile::TempDir;

    #[test]
    fn open_fails_without_team_data() {
        let dir = TempDir::new().expect("temp dir should be created");
        let err = WorkspaceStore::open(dir.path()).expect_err("open should fail");
        assert!(matches!(err, KpiError::DatasetNotFound(_)));
    }

    #[test]
    fn open_tolerates_missing_history_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        std::fs::write(
            dir.path().join(TEAM_DATA_FILE),
            r#"{"developers": [], "tickets": [], "bugs": []}"#,
        )
        .expect("team data should write");
        let store = WorkspaceStore::open(dir.path()).expect("open should succeed");
        assert!(store.historical_kpis("dev-1").is_empty());
    }

    #[test]
    fn period_queries_filter_by_developer_and_assignment_date() {
        let march = Period::new(3, 2025).unwrap();
        let store = store_with(
            vec![developer("dev-1", true), developer("dev-2", true)],
            vec![
                // Assigned in March, completed in April: March's population.
                ticket(
                    "t1",
                    "dev-1",
                    TicketStatus::Completed,
                    at(2025, 3, 20),
                    at(2025, 3, 30),
                    Some(at(2025, 4, 2)),
                ),
                ticket(
                    "t2",
                    "dev-1",
                    TicketStatus::Assigned,
                    at(2025, 4, 1),
                    at(2025, 4, 10),
                    None,
                ),
                ticket(
                    "t3",
                    "dev-2",
                    TicketStatus::Assigned,
                    at(2025, 3, 5),
                    at(2025, 3, 15),
                    None,
                ),
            ],
            vec![
                bug("b1", "dev-1", BugSeverity::High, BugType::DeveloperError, at(2025, 3, 8)),
                bug("b2", "dev-1", BugSeverity::Low, BugType::Conceptual, at(2025, 2, 8)),
            ],
        );

        let tickets = store.tickets_for_developer_in_period("dev-1", march);
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].id, "t1");

        let bugs = store.bugs_for_developer_in_period("dev-1", march);
        assert_eq!(bugs.len(), 1);
        assert_eq!(bugs[0].id, "b1");
    }

    #[test]
    fn active_developers_excludes_deactivated() {
        let store = store_with(
            vec![developer("dev-1", true), developer("dev-2", false)],
            Vec::new(),
            Vec::new(),
        );
        let active = store.active_developers();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "dev-1");
    }

    #[test]
    fn save_round_trips_data_and_history() {
        let dir = TempDir::new().expect("temp dir should be created");
        std::fs::write(
            dir.path().join(TEAM_DATA_FILE),
            r#"{"developers": [], "tickets": [], "bugs": []}"#,
        )
        .expect("team data should write");

        let mut store = WorkspaceStore::open(dir.path()).expect("open should succeed");
        store.data.developers.push(developer("dev-1", true));
        store.save().expect("save should succeed");

        let reloaded = WorkspaceStore::open(dir.path()).expect("reopen should succeed");
        assert_eq!(reloaded.developers().len(), 1);
    }
}
