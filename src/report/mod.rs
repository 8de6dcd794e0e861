pub mod csv;
pub mod json;
pub mod md;

use crate::error::KpiError;
use crate::types::kpi::MonthlyKpi;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Md,
    Json,
    Csv,
}

pub fn render_snapshot(kpi: &MonthlyKpi, format: OutputFormat) -> Result<String, KpiError> {
    match format {
        OutputFormat::Md => Ok(md::snapshot_to_markdown(kpi)),
        OutputFormat::Json => json::to_json(kpi).map_err(KpiError::Json),
        OutputFormat::Csv => Ok(csv::to_csv(std::slice::from_ref(kpi))),
    }
}

pub fn render_history(rows: &[MonthlyKpi], format: OutputFormat) -> Result<String, KpiError> {
    match format {
        OutputFormat::Md => Ok(md::history_to_markdown(rows)),
        OutputFormat::Json => json::to_json(&rows).map_err(KpiError::Json),
        OutputFormat::Csv => Ok(csv::to_csv(rows)),
    }
}
