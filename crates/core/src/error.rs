use std::path::PathBuf;

/// Failure to parse a `dd/MM/yyyy` date of birth.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("'{0}' is not in dd/MM/yyyy form")]
    Layout(String),
    #[error("'{0}' is not a calendar date")]
    NoSuchDate(String),
}

impl DateParseError {
    /// The trimmed text that was rejected.
    pub fn input(&self) -> &str {
        match self {
            DateParseError::Layout(input) | DateParseError::NoSuchDate(input) => input,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode records: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("not a records file: {0}")]
    InvalidFormat(String),
    #[error("unsupported records file version {0}")]
    UnsupportedVersion(u32),
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] medrec_types::TextError),
}

impl StoreError {
    /// Whether the error means the file exists but its contents cannot be used as records.
    pub fn is_incompatible(&self) -> bool {
        matches!(
            self,
            StoreError::Decode(_)
                | StoreError::InvalidFormat(_)
                | StoreError::UnsupportedVersion(_)
                | StoreError::InvalidRecord(_)
        )
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
