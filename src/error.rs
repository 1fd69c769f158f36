use thiserror::Error;

pub type RangeResult<T> = Result<T, RangeError>;

#[derive(Error, Debug)]
pub enum RangeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Invalid range address: {0}")]
    Address(String),

    #[error("No range is selected")]
    NoSelection,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl From<calamine::Error> for RangeError {
    fn from(err: calamine::Error) -> Self {
        RangeError::Workbook(err.to_string())
    }
}
