//! Error types for RITM Roller
//!
//! Each pipeline component has its own error enum; the top-level `AppError`
//! wraps them transparently so command handlers can return one `Result` type.

use std::path::PathBuf;
use thiserror::Error;

/// Line-parsing and record-construction errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input file not found
    #[error("Input file not found: {path}")]
    NotFound { path: PathBuf },

    /// Date token does not match the DD/MM/YYYY shape
    #[error("Malformed date token: {token}. Expected DD/MM/YYYY")]
    BadDateShape { token: String },

    /// I/O error reading the input file
    #[error("I/O error reading input")]
    Io(#[from] std::io::Error),
}

/// Structured-record persistence errors
#[derive(Error, Debug)]
pub enum RecordError {
    /// Record file not found
    #[error("Record file not found: {path}")]
    NotFound { path: PathBuf },

    /// Malformed JSON in the record file
    #[error("Invalid JSON in record file")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error reading or writing records
    #[error("I/O error accessing record file")]
    Io(#[from] std::io::Error),
}

/// Date-filtering errors
#[derive(Error, Debug)]
pub enum FilterError {
    /// Allowed-dates file not found
    #[error("Open-dates file not found: {path}")]
    NotFound { path: PathBuf },

    /// I/O error reading the allowed-dates file
    #[error("I/O error reading open-dates file")]
    Io(#[from] std::io::Error),
}

/// Grouping and manifest-publication errors
#[derive(Error, Debug)]
pub enum RollError {
    /// Completion date cannot be reduced to a COB key
    #[error("Malformed completion date for {number}: {date}. Expected YYYY/MM/DD")]
    BadCobDate { number: String, date: String },

    /// Staging manifest could not be written
    #[error("Failed to write staging manifest: {path}")]
    StagingWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest could not be copied to its destination directory
    #[error("Failed to publish manifest to {dest}")]
    Publish {
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O error during grouping or publication
    #[error("I/O error during roll")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// I/O error reading configuration
    #[error("I/O error reading configuration")]
    Io(#[from] std::io::Error),
}

/// Top-level application error that can represent any component error
#[derive(Error, Debug)]
pub enum AppError {
    /// Line-parsing error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Record persistence error
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Date-filtering error
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Grouping/publication error
    #[error(transparent)]
    Roll(#[from] RollError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Parse(_) => "parse",
            AppError::Record(_) => "record",
            AppError::Filter(_) => "filter",
            AppError::Roll(_) => "roll",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Parse result type alias
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Record persistence result type alias
pub type RecordResult<T> = std::result::Result<T, RecordError>;

/// Filter result type alias
pub type FilterResult<T> = std::result::Result<T, FilterError>;

/// Roll result type alias
pub type RollResult<T> = std::result::Result<T, RollError>;
