//! COB grouping and manifest publication
//!
//! Folds records into per-COB-date groups, then publishes one manifest per
//! group: the file list is written to a shared staging manifest and copied
//! into a destination directory named after the COB date. Publication is
//! strictly sequential; the shared staging path imposes a
//! write-then-copy-before-next-group ordering, so groups must never be
//! published in parallel without giving each its own staging path.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::app::models::Record;
use crate::constants::roll::{MANIFEST_NAME, OUTPUT_ROOT, STAGING_DIR};
use crate::errors::{RollError, RollResult};

/// Normalized completion-date shape accepted by the COB key derivation
static COB_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap());

/// One group of records sharing a COB date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CobGroup {
    /// RITM numbers mapped to this date, in input order, duplicates allowed
    pub ritms: Vec<String>,
    /// Distinct file references across all contributing records,
    /// exact-string deduplicated, first-seen order
    pub files: Vec<String>,
}

impl CobGroup {
    fn fold(&mut self, record: &Record) {
        self.ritms.push(record.number.clone());
        for file in &record.files {
            if !self.files.contains(file) {
                self.files.push(file.clone());
            }
        }
    }
}

/// What to do with a record whose completion date has no valid COB key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePolicy {
    /// Drop the record with a diagnostic and keep rolling
    #[default]
    Skip,
    /// Abort the whole run
    Strict,
}

/// Derive the `YYYYMMDD` COB key from a normalized `YYYY/MM/DD` date
///
/// Separator stripping only; impossible calendar dates propagate verbatim.
pub fn cob_key(date: &str) -> Option<String> {
    let date = date.trim();
    if COB_SHAPE.is_match(date) {
        Some(date.chars().filter(|c| *c != '/').collect())
    } else {
        None
    }
}

/// Fold records into COB groups, keyed ascending
///
/// Returns the groups and the number of records dropped for malformed
/// dates under [`DatePolicy::Skip`].
///
/// # Errors
///
/// Under [`DatePolicy::Strict`], the first malformed completion date aborts
/// with `RollError::BadCobDate`.
pub fn group_records(
    records: &[Record],
    policy: DatePolicy,
) -> RollResult<(BTreeMap<String, CobGroup>, usize)> {
    let mut groups: BTreeMap<String, CobGroup> = BTreeMap::new();
    let mut skipped = 0;

    for record in records {
        let key = match cob_key(&record.u_desired_completion_date) {
            Some(key) => key,
            None => match policy {
                DatePolicy::Skip => {
                    warn!(
                        "Skipping {}: malformed completion date {:?}",
                        record.number, record.u_desired_completion_date
                    );
                    skipped += 1;
                    continue;
                }
                DatePolicy::Strict => {
                    return Err(RollError::BadCobDate {
                        number: record.number.clone(),
                        date: record.u_desired_completion_date.clone(),
                    })
                }
            },
        };
        groups.entry(key).or_default().fold(record);
    }

    debug!("Grouped {} records into {} COB dates", records.len(), groups.len());
    Ok((groups, skipped))
}

/// Report for one published COB group
#[derive(Debug, Clone)]
pub struct PublishedGroup {
    /// COB date key, `YYYYMMDD`
    pub cob_date: String,
    /// RITM numbers that contributed to the group
    pub ritms: Vec<String>,
    /// Number of file references in the manifest
    pub file_count: usize,
    /// Destination the manifest was copied to
    pub dest: PathBuf,
}

/// Summary of one roll run
#[derive(Debug, Clone, Default)]
pub struct RollSummary {
    /// Groups whose manifest was published
    pub published: Vec<PublishedGroup>,
    /// COB dates skipped because their file list was empty
    pub skipped_empty: Vec<String>,
    /// Records dropped for malformed completion dates
    pub records_skipped: usize,
}

/// Publishes per-COB-date manifests through a shared staging file
///
/// The staging location is an explicit field rather than a process-wide
/// path, but it is still shared across groups within a run.
#[derive(Debug, Clone)]
pub struct Roller {
    /// Directory holding the shared staging manifest
    pub staging_dir: PathBuf,
    /// Destination root; each group lands in `<output_root>/<COB date>/`
    pub output_root: PathBuf,
    /// Manifest filename, identical across all dates
    pub manifest_name: String,
}

impl Roller {
    /// Create a roller with explicit staging and destination locations
    pub fn new(
        staging_dir: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        manifest_name: impl Into<String>,
    ) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            output_root: output_root.into(),
            manifest_name: manifest_name.into(),
        }
    }

    /// Path of the shared staging manifest
    pub fn staging_path(&self) -> PathBuf {
        self.staging_dir.join(&self.manifest_name)
    }

    /// Group the records and publish one manifest per non-empty group,
    /// ascending by COB date
    pub fn roll(&self, records: &[Record], policy: DatePolicy) -> RollResult<RollSummary> {
        let (groups, records_skipped) = group_records(records, policy)?;
        info!(
            "Rolling {} records across {} COB dates",
            records.len(),
            groups.len()
        );

        let mut summary = RollSummary {
            records_skipped,
            ..Default::default()
        };

        for (cob_date, group) in &groups {
            if group.files.is_empty() {
                info!("No files listed for COB {} - skipping", cob_date);
                summary.skipped_empty.push(cob_date.clone());
                continue;
            }

            let dest = self.publish(cob_date, &group.files)?;
            summary.published.push(PublishedGroup {
                cob_date: cob_date.clone(),
                ritms: group.ritms.clone(),
                file_count: group.files.len(),
                dest,
            });
        }

        Ok(summary)
    }

    /// Write the staging manifest and copy it into the group's destination
    /// directory, creating it if absent
    fn publish(&self, cob_date: &str, files: &[String]) -> RollResult<PathBuf> {
        let staging = self.staging_path();
        write_manifest(&staging, files).map_err(|source| RollError::StagingWrite {
            path: staging.clone(),
            source,
        })?;
        debug!("Staged manifest at {}", staging.display());

        let dest_dir = self.output_root.join(cob_date);
        let dest = dest_dir.join(&self.manifest_name);
        fs::create_dir_all(&dest_dir).map_err(|source| RollError::Publish {
            dest: dest.clone(),
            source,
        })?;
        fs::copy(&staging, &dest).map_err(|source| RollError::Publish {
            dest: dest.clone(),
            source,
        })?;

        info!("Published {} -> {}", self.manifest_name, dest_dir.display());
        Ok(dest)
    }
}

impl Default for Roller {
    fn default() -> Self {
        Self::new(STAGING_DIR, OUTPUT_ROOT, MANIFEST_NAME)
    }
}

/// Write a newline-joined manifest with a trailing newline
fn write_manifest(path: &Path, files: &[String]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{}\n", files.join("\n")))
}
