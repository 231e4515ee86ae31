use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
