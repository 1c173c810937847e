//! Application constants for RITM Roller
//!
//! Centralizes default paths, filenames, and parser vocabulary, organized
//! by functional domain as nested modules.

/// Default file paths for the pipeline stages
pub mod files {
    /// Default structured-record file produced by the parse stage
    pub const RECORDS_JSON: &str = "records.json";

    /// Default allowed-dates file consumed by the filter stage
    pub const OPEN_DATES_TXT: &str = "open_dates.txt";

    /// Default filtered-record file produced by the filter stage
    pub const VALID_RITM_JSON: &str = "valid_ritm.json";
}

/// Manifest staging and publication locations
pub mod roll {
    /// Default staging directory for the shared manifest
    pub const STAGING_DIR: &str = "tmp";

    /// Default destination root; manifests land in `<root>/<COB date>/`
    pub const OUTPUT_ROOT: &str = "w_bypass";

    /// Fixed manifest filename, shared across all COB dates
    pub const MANIFEST_NAME: &str = "DEALS.DAT";
}

/// Line-parser heuristics
pub mod parser {
    /// Prefix that marks a token as a request identifier, never a category word
    pub const RITM_PREFIX: &str = "RITM";

    /// Known category vocabulary. The category splitter accepts a capitalized
    /// token only if it appears here; this is a fixed-vocabulary heuristic,
    /// not a general tokenizer.
    pub const CATEGORY_WORDS: &[&str] = &["Risk", "Rolling"];

    /// Maximum number of tokens in a reconstructed category label
    pub const MAX_CATEGORY_TOKENS: usize = 2;

    /// Minimum whitespace-delimited tokens for a line to be considered at all
    pub const MIN_LINE_TOKENS: usize = 8;

    /// Tokens consumed by the fixed date/time block
    pub const DATE_BLOCK_TOKENS: usize = 5;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        assert!(files::RECORDS_JSON.ends_with(".json"));
        assert_eq!(roll::MANIFEST_NAME, "DEALS.DAT");
        assert!(parser::MIN_LINE_TOKENS > parser::DATE_BLOCK_TOKENS);
        assert!(parser::CATEGORY_WORDS.contains(&"Risk"));
    }
}
