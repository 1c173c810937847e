//! Completion-date filtering against an externally supplied allowlist
//!
//! The allowed-date set is a line-oriented text file of `YYYY/MM/DD` dates.
//! A record survives the filter iff its normalized completion date is an
//! exact member of that set.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::app::models::Record;
use crate::errors::{FilterError, FilterResult};

/// Load the set of open COB dates from a newline-delimited file
///
/// Lines are whitespace-trimmed; blank lines are ignored. Order is
/// irrelevant, duplicates collapse by set membership.
///
/// # Errors
///
/// Returns `FilterError::NotFound` when the file is missing.
pub fn load_open_dates<P: AsRef<Path>>(path: P) -> FilterResult<HashSet<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FilterError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            FilterError::Io(e)
        }
    })?;

    let mut dates = HashSet::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let date = line.trim();
        if !date.is_empty() {
            dates.insert(date.to_string());
        }
    }

    info!("Loaded {} open dates from {}", dates.len(), path.display());
    Ok(dates)
}

/// Retain records whose completion date is a member of the allowed set
///
/// The filter is stable: output order equals input order. An empty allowed
/// set yields an empty result. Records with an empty completion date can
/// never match a populated set member.
pub fn filter_records(records: Vec<Record>, open_dates: &HashSet<String>) -> Vec<Record> {
    let total = records.len();
    let retained: Vec<Record> = records
        .into_iter()
        .filter(|record| {
            let keep = open_dates.contains(&record.u_desired_completion_date);
            if !keep {
                debug!(
                    "Dropping {} (date {})",
                    record.number, record.u_desired_completion_date
                );
            }
            keep
        })
        .collect();

    info!("Retained {} of {} records", retained.len(), total);
    retained
}
