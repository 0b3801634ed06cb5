use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScepttrError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Library Error (record {record}): {message}")]
    Library { record: usize, message: String },

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type ScResult<T> = Result<T, ScepttrError>;
