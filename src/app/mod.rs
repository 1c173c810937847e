//! Core pipeline logic for RITM Roller
//!
//! Three components consumed in a pipeline, each runnable standalone given
//! the prior stage's output file: the line parser, the completion-date
//! filter, and the COB grouping/manifest emitter.

pub mod filter;
pub mod models;
pub mod parser;
pub mod roller;

// Re-export main public API
pub use filter::{filter_records, load_open_dates};
pub use models::{LineOutcome, Record, RecordSet, RejectReason};
pub use parser::{extract_files, reformat_date, reformat_datetime, LineParser, ParseStats};
pub use roller::{cob_key, group_records, CobGroup, DatePolicy, RollSummary, Roller};
