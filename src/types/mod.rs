pub mod bug;
pub mod config;
pub mod developer;
pub mod kpi;
pub mod ticket;
