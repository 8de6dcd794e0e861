use thiserror::Error;

#[derive(Error, Debug)]
pub enum KpiError {
    #[error("developer not found: {0}")]
    DeveloperNotFound(String),

    #[error("ticket not found: {0}")]
    TicketNotFound(String),

    #[error("bug not found: {0}")]
    BugNotFound(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid ticket transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("workspace dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("dataset parse error: {0}")]
    DatasetParse(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("no developer produced data for {month}/{year}")]
    AggregateFailure { month: u32, year: i32 },

    #[error("invalid period: month {0} (expected 1-12)")]
    InvalidPeriod(u32),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KpiError>;
