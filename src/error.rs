use thiserror::Error;

#[derive(Error, Debug)]
pub enum SatchelError {
    #[error("Invalid file type: .{0} (expected .csv, .xls or .xlsx)")]
    InvalidFileType(String),

    #[error("Cannot {op} while {state}")]
    InvalidState { op: &'static str, state: &'static str },

    #[error("Preview failed: {0}")]
    PreviewFailed(String),

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SatchelError>;
