#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse Error: {0}")]
    Parse(String),
    #[error("Precondition Error: {0}")]
    Precondition(String),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
