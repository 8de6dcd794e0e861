use crate::types::bug::BugType;
use crate::types::ticket::TicketStatus;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "teamkpi",
    version,
    about = "Software-team KPI tracking and monthly performance reporting CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate and persist a developer's monthly KPI snapshot
    Report(ReportCommand),
    /// Live current-month KPI preview, not persisted
    Preview(PreviewCommand),
    /// Generate and persist the team aggregate for a period
    Team(TeamCommand),
    /// Stored KPI snapshots for a developer, oldest first
    History(HistoryCommand),
    /// CSV export of one or all developers' snapshots for a period
    Export(ExportCommand),
    /// Ticket workflow actions
    Ticket(TicketCommand),
    /// Bug lifecycle actions
    Bug(BugCommand),
    /// Developer roster actions
    Developer(DeveloperCommand),
    /// List developers, tickets or bugs
    List(ListCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Md,
    Json,
    Csv,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum StatusArg {
    Assigned,
    InProgress,
    Review,
    Completed,
    Reopened,
}

impl From<StatusArg> for TicketStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Assigned => TicketStatus::Assigned,
            StatusArg::InProgress => TicketStatus::InProgress,
            StatusArg::Review => TicketStatus::Review,
            StatusArg::Completed => TicketStatus::Completed,
            StatusArg::Reopened => TicketStatus::Reopened,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum BugTypeArg {
    DeveloperError,
    Conceptual,
    RequirementChange,
    Environment,
    ThirdParty,
}

impl From<BugTypeArg> for BugType {
    fn from(bug_type: BugTypeArg) -> Self {
        match bug_type {
            BugTypeArg::DeveloperError => BugType::DeveloperError,
            BugTypeArg::Conceptual => BugType::Conceptual,
            BugTypeArg::RequirementChange => BugType::RequirementChange,
            BugTypeArg::Environment => BugType::Environment,
            BugTypeArg::ThirdParty => BugType::ThirdParty,
        }
    }
}

#[derive(Args)]
pub struct ReportCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub developer: String,
    #[arg(long)]
    pub month: u32,
    #[arg(long)]
    pub year: i32,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct PreviewCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub developer: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct TeamCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub month: u32,
    #[arg(long)]
    pub year: i32,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct HistoryCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub developer: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ExportCommand {
    pub path: PathBuf,
    /// Omit to export every active developer
    #[arg(long)]
    pub developer: Option<String>,
    #[arg(long)]
    pub month: u32,
    #[arg(long)]
    pub year: i32,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct TicketCommand {
    pub path: PathBuf,
    #[command(subcommand)]
    pub action: TicketAction,
}

#[derive(Subcommand)]
pub enum TicketAction {
    /// Complete a reviewed ticket, adding logged hours
    Complete {
        #[arg(long)]
        id: String,
        #[arg(long)]
        hours: Option<f64>,
        /// Completion timestamp (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Reopen a completed ticket (counts as rework)
    Reopen {
        #[arg(long)]
        id: String,
    },
    /// Move a ticket along the workflow
    Status {
        #[arg(long)]
        id: String,
        #[arg(long, value_enum)]
        to: StatusArg,
    },
}

#[derive(Args)]
pub struct BugCommand {
    pub path: PathBuf,
    #[command(subcommand)]
    pub action: BugAction,
}

#[derive(Subcommand)]
pub enum BugAction {
    /// Mark a bug resolved, optionally booking fix hours
    Resolve {
        #[arg(long)]
        id: String,
        /// Resolving developer (may differ from the one penalized)
        #[arg(long)]
        by: Option<String>,
        #[arg(long)]
        fix_ticket: Option<String>,
        #[arg(long)]
        hours: Option<f64>,
        /// Resolution timestamp (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Change a bug's classification
    Reclassify {
        #[arg(long)]
        id: String,
        #[arg(long = "type", value_enum)]
        bug_type: BugTypeArg,
    },
}

#[derive(Args)]
pub struct DeveloperCommand {
    pub path: PathBuf,
    #[command(subcommand)]
    pub action: DeveloperAction,
}

#[derive(Subcommand)]
pub enum DeveloperAction {
    /// Soft delete: drop from current listings, keep all history
    Deactivate {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct ListCommand {
    pub path: PathBuf,
    #[command(subcommand)]
    pub what: ListWhat,
}

#[derive(Subcommand)]
pub enum ListWhat {
    /// Active developers (pass --all for deactivated too)
    Developers {
        #[arg(long)]
        all: bool,
    },
    /// Tickets, optionally narrowed by developer or status
    Tickets {
        #[arg(long)]
        developer: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Bugs, optionally narrowed by developer or unresolved only
    Bugs {
        #[arg(long)]
        developer: Option<String>,
        #[arg(long)]
        unresolved: bool,
    },
}
