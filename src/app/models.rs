//! Data models for RITM Roller
//!
//! Defines the structured record produced by the line parser, the persisted
//! record-set wrapper, and the per-line parse outcome.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{RecordError, RecordResult};

/// A fully reconstructed request record
///
/// Field names are the wire names used in the structured-record JSON file.
/// All date fields are already normalized: timestamps as
/// `YYYY/MM/DD HH:MM:SS`, the completion date as `YYYY/MM/DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Request identifier, the first token of the source line
    pub number: String,
    /// Short category label reconstructed from 1-2 vocabulary tokens
    pub cat_item: String,
    /// Display name of the requester
    pub requested_for: String,
    /// Opened timestamp, `YYYY/MM/DD HH:MM:SS`
    pub opened_at: String,
    /// Last-updated timestamp, `YYYY/MM/DD HH:MM:SS`
    pub sys_updated_on: String,
    /// Desired completion date, `YYYY/MM/DD`
    pub u_desired_completion_date: String,
    /// Free-text tail of the source line
    pub u_requestdetails: String,
    /// Distinct file references extracted from the request details,
    /// case-insensitively deduplicated, first-seen casing and order kept
    pub files: Vec<String>,
}

/// The persisted record collection, `{"records": [...]}` on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    /// Records in input order
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Create a record set from parsed records
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load a record set from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` when the file is missing and
    /// `RecordError::JsonParse` when the content is not a valid record set.
    pub fn load<P: AsRef<Path>>(path: P) -> RecordResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RecordError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let set: RecordSet = serde_json::from_str(&content)?;
        info!("Loaded {} records from {}", set.records.len(), path.display());
        Ok(set)
    }

    /// Persist the record set as pretty-printed JSON
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> RecordResult<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!(
            "Wrote {} records to {}",
            self.records.len(),
            path.display()
        );
        Ok(())
    }

    /// Number of records in the set
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the set holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Why a line was rejected by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Fewer whitespace-delimited tokens than a record can ever have
    TooFewFields,
    /// The fixed date/time block ran out of tokens
    MissingDateFields,
    /// A date slot in the fixed block held a token that is not DD/MM/YYYY
    MalformedDate,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewFields => write!(f, "too few fields"),
            Self::MissingDateFields => write!(f, "missing date fields"),
            Self::MalformedDate => write!(f, "malformed date token"),
        }
    }
}

/// Outcome of parsing one input line
///
/// Blank lines are distinguished from malformed ones so callers can skip
/// the former silently and log the latter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line yielded a complete record
    Accepted(Record),
    /// The line was empty after trimming
    Blank,
    /// The line was structurally malformed
    Rejected { reason: RejectReason },
}
