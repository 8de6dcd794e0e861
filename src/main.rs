mod cli;
mod config;
mod engine;
mod error;
mod history;
mod report;
mod store;
mod types;

use crate::error::KpiError;
use crate::store::WorkspaceStore;
use crate::types::config::KpiConfig;
use crate::types::kpi::{MonthlyKpi, Period};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Md => report::OutputFormat::Md,
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Csv => report::OutputFormat::Csv,
    }
}

/// Load the workspace config, falling back to defaults. The second value
/// flags the fallback so callers can exit with a warning.
fn load_or_default(root: &Path) -> Result<(KpiConfig, bool), KpiError> {
    match config::load_config(root)? {
        Some(cfg) => Ok((cfg, false)),
        None => Ok((KpiConfig::default(), true)),
    }
}

fn finish(config_missing: bool, root: &Path) -> i32 {
    if config_missing {
        eprintln!(
            "warning: no {} found in {}; default scoring applied",
            config::DEFAULT_CONFIG_FILE,
            root.display()
        );
        exit_code::WARNINGS
    } else {
        exit_code::SUCCESS
    }
}

fn run() -> Result<i32, KpiError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Report(cmd) => {
            let period = Period::new(cmd.month, cmd.year)?;
            let (config, config_missing) = load_or_default(&cmd.path)?;
            let mut store = WorkspaceStore::open(&cmd.path)?;
            let snapshot =
                engine::generate_monthly_kpi(&mut store, &config, &cmd.developer, period)?;
            store.save()?;
            println!("{}", report::render_snapshot(&snapshot, output_format(cmd.format))?);
            Ok(finish(config_missing, &cmd.path))
        }
        cli::Commands::Preview(cmd) => {
            let (config, config_missing) = load_or_default(&cmd.path)?;
            let store = WorkspaceStore::open(&cmd.path)?;
            let snapshot = engine::preview_current_month(&store, &config, &cmd.developer)?;
            println!("{}", report::render_snapshot(&snapshot, output_format(cmd.format))?);
            Ok(finish(config_missing, &cmd.path))
        }
        cli::Commands::Team(cmd) => {
            let period = Period::new(cmd.month, cmd.year)?;
            let (config, config_missing) = load_or_default(&cmd.path)?;
            let mut store = WorkspaceStore::open(&cmd.path)?;
            match engine::generate_team_kpi(&mut store, &config, period) {
                Ok(aggregate) => {
                    store.save()?;
                    println!(
                        "{}",
                        report::render_snapshot(&aggregate, output_format(cmd.format))?
                    );
                    Ok(finish(config_missing, &cmd.path))
                }
                Err(KpiError::AggregateFailure { .. }) => {
                    eprintln!("team {period}: no data");
                    Ok(exit_code::WARNINGS)
                }
                Err(error) => Err(error),
            }
        }
        cli::Commands::History(cmd) => {
            let store = WorkspaceStore::open(&cmd.path)?;
            let rows = history::sorted_history(&store.historical_kpis(&cmd.developer), &cmd.developer);
            println!("{}", report::render_history(&rows, output_format(cmd.format))?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Export(cmd) => {
            let period = Period::new(cmd.month, cmd.year)?;
            let (config, config_missing) = load_or_default(&cmd.path)?;
            let store = WorkspaceStore::open(&cmd.path)?;
            let rows = export_rows(&store, &config, cmd.developer.as_deref(), period)?;
            let rendered = report::render_history(&rows, report::OutputFormat::Csv)?;
            match cmd.output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("exported {} row(s) to {}", rows.len(), path.display());
                }
                None => print!("{rendered}"),
            }
            Ok(finish(config_missing, &cmd.path))
        }
        cli::Commands::Ticket(cmd) => {
            let mut store = WorkspaceStore::open(&cmd.path)?;
            match cmd.action {
                cli::TicketAction::Complete { id, hours, at } => {
                    let ticket = store.complete_ticket(&id, hours, at)?;
                    store.save()?;
                    println!(
                        "completed {} (actual hours: {:.1})",
                        ticket.id,
                        ticket.actual_hours.unwrap_or(0.0)
                    );
                }
                cli::TicketAction::Reopen { id } => {
                    let ticket = store.reopen_ticket(&id)?;
                    store.save()?;
                    println!("reopened {} (reopen count: {})", ticket.id, ticket.reopen_count);
                }
                cli::TicketAction::Status { id, to } => {
                    let ticket = store.set_ticket_status(&id, to.into())?;
                    store.save()?;
                    println!("{} -> {}", ticket.id, ticket.status.as_str());
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Bug(cmd) => {
            let mut store = WorkspaceStore::open(&cmd.path)?;
            match cmd.action {
                cli::BugAction::Resolve {
                    id,
                    by,
                    fix_ticket,
                    hours,
                    at,
                } => {
                    let bug =
                        store.resolve_bug(&id, by.as_deref(), fix_ticket.as_deref(), hours, at)?;
                    store.save()?;
                    println!("resolved {}", bug.id);
                }
                cli::BugAction::Reclassify { id, bug_type } => {
                    let changed = store.reclassify_bug(&id, bug_type.into())?;
                    if changed {
                        store.save()?;
                        println!("reclassified {id}");
                    } else {
                        println!("{id} unchanged");
                    }
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Developer(cmd) => {
            let mut store = WorkspaceStore::open(&cmd.path)?;
            match cmd.action {
                cli::DeveloperAction::Deactivate { id } => {
                    store.deactivate_developer(&id)?;
                    store.save()?;
                    println!("deactivated {id}");
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::List(cmd) => {
            let store = WorkspaceStore::open(&cmd.path)?;
            list(&store, cmd.what);
            Ok(exit_code::SUCCESS)
        }
    }
}

/// Rows for CSV export: the stored snapshot for the period when present,
/// a live computation otherwise. Nothing is persisted.
fn export_rows(
    store: &WorkspaceStore,
    config: &KpiConfig,
    developer: Option<&str>,
    period: Period,
) -> Result<Vec<MonthlyKpi>, KpiError> {
    let ids: Vec<String> = match developer {
        Some(id) => {
            store.developer(id)?;
            vec![id.to_string()]
        }
        None => store
            .active_developers()
            .iter()
            .map(|dev| dev.id.clone())
            .collect(),
    };

    let mut rows = Vec::with_capacity(ids.len());
    for id in ids {
        let stored = store
            .historical_kpis(&id)
            .into_iter()
            .find(|kpi| kpi.period() == period);
        let row = match stored {
            Some(kpi) => kpi,
            None => engine::compute_snapshot(store, config, &id, period)?,
        };
        rows.push(row);
    }
    Ok(rows)
}

fn list(store: &WorkspaceStore, what: cli::ListWhat) {
    match what {
        cli::ListWhat::Developers { all } => {
            for dev in store.developers() {
                if !all && !dev.is_active {
                    continue;
                }
                println!(
                    "{} {} <{}> role={} team={}{}",
                    dev.id,
                    dev.name,
                    dev.email,
                    dev.role.as_str(),
                    dev.team.as_deref().unwrap_or("-"),
                    if dev.is_active { "" } else { " (inactive)" }
                );
            }
        }
        cli::ListWhat::Tickets { developer, status } => {
            let status = status.map(types::ticket::TicketStatus::from);
            for ticket in store.tickets() {
                if developer.as_deref().is_some_and(|id| ticket.developer_id != id) {
                    continue;
                }
                if status.is_some_and(|wanted| ticket.status != wanted) {
                    continue;
                }
                println!(
                    "{} [{}] {} due {} reopens={} {}",
                    ticket.id,
                    ticket.status.as_str(),
                    ticket.developer_id,
                    ticket.due_date.format("%Y-%m-%d"),
                    ticket.reopen_count,
                    ticket.title
                );
            }
        }
        cli::ListWhat::Bugs { developer, unresolved } => {
            for bug in store.bugs() {
                if developer.as_deref().is_some_and(|id| bug.developer_id != id) {
                    continue;
                }
                if unresolved && bug.is_resolved {
                    continue;
                }
                println!(
                    "{} [{}/{}] {} {} {}",
                    bug.id,
                    bug.severity.as_str(),
                    bug.bug_type.as_str(),
                    bug.developer_id,
                    if bug.is_resolved { "resolved" } else { "open" },
                    bug.title
                );
            }
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
