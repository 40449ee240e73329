use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroundsError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid {column} count in row {row}: {value:?}")]
    CountParse {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Override error: {0}")]
    Override(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GroundsError>;
