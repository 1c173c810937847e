//! Line reconstruction for raw RITM request lines
//!
//! Turns one whitespace-delimited text line into a structured [`Record`].
//! The line format has no fixed column widths, so field boundaries are
//! inferred from content: an explicit state machine walks the token stream
//! through `ReadingCategory -> ReadingName -> ReadingDates -> ReadingTail`,
//! classifying each token as identifier, date-shaped, capitalized, or
//! generic.
//!
//! The category splitter is a fixed-vocabulary heuristic, not a general
//! tokenizer: a capitalized token is only accepted into the category label
//! when it appears in the known vocabulary (`Risk`, `Rolling` by default).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::app::models::{LineOutcome, Record, RejectReason};
use crate::constants::parser::{
    CATEGORY_WORDS, DATE_BLOCK_TOKENS, MAX_CATEGORY_TOKENS, MIN_LINE_TOKENS, RITM_PREFIX,
};
use crate::errors::{ParseError, ParseResult};

/// Strict DD/MM/YYYY shape; no calendar validation beyond the digit layout
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap());

/// Tolerant file-reference pattern: word/hyphen/underscore characters, an
/// optional parenthesized group, optional dot-separated extension segments,
/// ending in a case-insensitive `.DAT` boundary
static FILE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[\w-]+(?:\([^)]+\))?(?:\.\w+)*\.DAT\b").unwrap());

/// Statistics about line parsing
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    /// Total lines processed
    pub lines_processed: usize,
    /// Lines that yielded a complete record
    pub accepted: usize,
    /// Empty lines skipped silently
    pub blank_lines: usize,
    /// Structurally malformed lines dropped with a diagnostic
    pub rejected_lines: usize,
}

impl ParseStats {
    /// Acceptance rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.lines_processed == 0 {
            0.0
        } else {
            (self.accepted as f64 / self.lines_processed as f64) * 100.0
        }
    }

    /// Total lines that produced no record
    pub fn total_skipped(&self) -> usize {
        self.blank_lines + self.rejected_lines
    }
}

/// Lexical class of one whitespace-delimited token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Starts with the request-identifier prefix
    Identifier,
    /// Matches the DD/MM/YYYY shape
    DateShaped,
    /// First character is ASCII uppercase
    Capitalized,
    /// Anything else
    Generic,
}

/// Named states of the field-reconstruction machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ReadingCategory,
    ReadingName,
    ReadingDates,
    ReadingTail,
}

/// Classify a token by prefix, date shape, and capitalization
pub fn classify(token: &str) -> TokenClass {
    if token.starts_with(RITM_PREFIX) {
        TokenClass::Identifier
    } else if DATE_SHAPE.is_match(token) {
        TokenClass::DateShaped
    } else if token.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        TokenClass::Capitalized
    } else {
        TokenClass::Generic
    }
}

/// True when the token matches the strict DD/MM/YYYY shape
pub fn is_date_shaped(token: &str) -> bool {
    DATE_SHAPE.is_match(token)
}

/// Reformat DD/MM/YYYY to YYYY/MM/DD
///
/// Only the shape is checked; impossible calendar dates pass through
/// verbatim (`31/02/2024` becomes `2024/02/31`).
///
/// # Errors
///
/// Returns `ParseError::BadDateShape` when the token does not match
/// DD/MM/YYYY.
pub fn reformat_date(token: &str) -> ParseResult<String> {
    if !DATE_SHAPE.is_match(token) {
        return Err(ParseError::BadDateShape {
            token: token.to_string(),
        });
    }
    let (day, rest) = token.split_at(2);
    let (month, year) = rest[1..].split_at(2);
    Ok(format!("{}/{}/{}", &year[1..], month, day))
}

/// Reformat a DD/MM/YYYY date plus a time token to `YYYY/MM/DD HH:MM:SS`
///
/// The time passes through verbatim; there is no timezone handling.
pub fn reformat_datetime(date: &str, time: &str) -> ParseResult<String> {
    Ok(format!("{} {}", reformat_date(date)?, time))
}

/// Extract distinct file references from free text
///
/// Matching is case-insensitive; results are deduplicated by uppercased
/// form while the first occurrence's casing and the order of first
/// appearance are retained.
pub fn extract_files(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut files = Vec::new();
    for m in FILE_REF.find_iter(text) {
        let name = m.as_str();
        if seen.insert(name.to_uppercase()) {
            files.push(name.to_string());
        }
    }
    files
}

/// Reconstructs records from raw request lines
#[derive(Debug, Clone)]
pub struct LineParser {
    /// Known category words; capitalized tokens outside this list end the
    /// category label
    vocabulary: Vec<String>,
}

impl LineParser {
    /// Create a parser with the default category vocabulary
    pub fn new() -> Self {
        Self::with_vocabulary(CATEGORY_WORDS.iter().map(|w| w.to_string()).collect())
    }

    /// Create a parser with a custom category vocabulary
    pub fn with_vocabulary(vocabulary: Vec<String>) -> Self {
        Self { vocabulary }
    }

    /// Transition predicate for `ReadingCategory`: accept a token into the
    /// category label when it is neither an identifier nor date-shaped, and
    /// is either uncapitalized or a known vocabulary word
    fn category_accepts(&self, token: &str) -> bool {
        match classify(token) {
            TokenClass::Identifier | TokenClass::DateShaped => false,
            TokenClass::Capitalized => self.vocabulary.iter().any(|w| w == token),
            TokenClass::Generic => true,
        }
    }

    /// Parse a single raw line into a [`LineOutcome`]
    ///
    /// Empty lines yield `Blank`; structural failures yield `Rejected` with
    /// a reason. Failure is always per-line.
    pub fn parse_line(&self, line: &str) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Blank;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < MIN_LINE_TOKENS {
            return LineOutcome::Rejected {
                reason: RejectReason::TooFewFields,
            };
        }

        let number = tokens[0].to_string();
        let mut cat_tokens: Vec<&str> = Vec::new();
        let mut name_tokens: Vec<&str> = Vec::new();
        let mut date_block: Vec<&str> = Vec::new();
        let mut tail_tokens: Vec<&str> = Vec::new();
        let mut state = ParseState::ReadingCategory;

        for &token in &tokens[1..] {
            state = match state {
                ParseState::ReadingCategory => {
                    if classify(token) == TokenClass::DateShaped {
                        // The first date-shaped token opens the date block
                        date_block.push(token);
                        ParseState::ReadingDates
                    } else if self.category_accepts(token)
                        && cat_tokens.len() < MAX_CATEGORY_TOKENS
                    {
                        cat_tokens.push(token);
                        if cat_tokens.len() == MAX_CATEGORY_TOKENS {
                            ParseState::ReadingName
                        } else {
                            ParseState::ReadingCategory
                        }
                    } else {
                        name_tokens.push(token);
                        ParseState::ReadingName
                    }
                }
                ParseState::ReadingName => {
                    if classify(token) == TokenClass::DateShaped {
                        date_block.push(token);
                        ParseState::ReadingDates
                    } else {
                        name_tokens.push(token);
                        ParseState::ReadingName
                    }
                }
                ParseState::ReadingDates => {
                    date_block.push(token);
                    if date_block.len() == DATE_BLOCK_TOKENS {
                        ParseState::ReadingTail
                    } else {
                        ParseState::ReadingDates
                    }
                }
                ParseState::ReadingTail => {
                    tail_tokens.push(token);
                    ParseState::ReadingTail
                }
            };
        }

        // Fixed date/time block: opened date+time, updated date+time,
        // completion date
        if date_block.len() < DATE_BLOCK_TOKENS {
            return LineOutcome::Rejected {
                reason: RejectReason::MissingDateFields,
            };
        }

        let opened = reformat_datetime(date_block[0], date_block[1]);
        let updated = reformat_datetime(date_block[2], date_block[3]);
        let completion = reformat_date(date_block[4]);
        let (opened_at, sys_updated_on, u_desired_completion_date) =
            match (opened, updated, completion) {
                (Ok(o), Ok(u), Ok(c)) => (o, u, c),
                _ => {
                    return LineOutcome::Rejected {
                        reason: RejectReason::MalformedDate,
                    }
                }
            };

        let details = tail_tokens.join(" ");
        let files = extract_files(&details);

        LineOutcome::Accepted(Record {
            number,
            cat_item: cat_tokens.join(" "),
            requested_for: name_tokens.join(" "),
            opened_at,
            sys_updated_on,
            u_desired_completion_date,
            u_requestdetails: details,
            files,
        })
    }

    /// Parse every line of an input file, accumulating accepted records
    ///
    /// Blank lines are skipped silently; malformed lines are dropped with a
    /// diagnostic and processing continues.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::NotFound` when the input file is missing; I/O
    /// failures while reading are also fatal.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> ParseResult<(Vec<Record>, ParseStats)> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ParseError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ParseError::Io(e)
            }
        })?;

        info!("Parsing request lines from {}", path.display());

        let mut records = Vec::new();
        let mut stats = ParseStats::default();

        for line in BufReader::new(file).lines() {
            let line = line?;
            stats.lines_processed += 1;

            match self.parse_line(&line) {
                LineOutcome::Accepted(record) => {
                    debug!("Accepted {}", record.number);
                    records.push(record);
                    stats.accepted += 1;
                }
                LineOutcome::Blank => {
                    stats.blank_lines += 1;
                }
                LineOutcome::Rejected { reason } => {
                    let prefix: String = line.chars().take(50).collect();
                    warn!(
                        "Skipping malformed line {} ({}): {}...",
                        stats.lines_processed, reason, prefix
                    );
                    stats.rejected_lines += 1;
                }
            }
        }

        info!(
            "Parsed {} records from {} lines ({:.1}% accepted)",
            stats.accepted,
            stats.lines_processed,
            stats.success_rate()
        );

        Ok((records, stats))
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}
