//! Error types for deck generation.
//!
//! Every failure is fatal for the whole run: there is no per-record skip
//! policy, so the variants below only carry enough context to explain what
//! went wrong.
use thiserror::Error;

/// Result type for deck generation.
pub type Result<T> = std::result::Result<T, Error>;

/// A record lacks a field that classification or rendering needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} is missing field `{field}`", describe_line(.line))]
pub struct MissingFieldError {
    /// Name of the absent field
    pub field: String,
    /// 1-based input line of the record, when read from a file
    pub line: Option<u64>,
}

impl MissingFieldError {
    pub fn new(field: impl Into<String>, line: Option<u64>) -> Self {
        Self {
            field: field.into(),
            line,
        }
    }
}

fn describe_line(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!("record on line {}", line),
        None => "record".to_string(),
    }
}

/// Main error type.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input (unreadable bytes, wrong column count, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header row lacks one or more required columns
    #[error("Missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A record lacks a referenced field
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),

    /// Slide capacity must hold at least one record
    #[error("Invalid slide capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Unusable configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// XML generation error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP container error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
