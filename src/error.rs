use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("reference date {0} leaves no room for a full spend history window")]
    InvalidReferenceDate(NaiveDate),

    #[error("dataset invariant violated: {0}")]
    InvariantViolation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
