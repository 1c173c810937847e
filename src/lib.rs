//! RITM Roller Library
//!
//! Reconstructs whitespace-delimited RITM request lines into structured
//! records, filters them against a set of open COB dates, and publishes one
//! file manifest per COB date into date-stamped destination directories.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(constants::roll::MANIFEST_NAME, "DEALS.DAT");
        assert_eq!(constants::files::RECORDS_JSON, "records.json");
    }

    #[test]
    fn test_error_types() {
        let roll_error = errors::RollError::BadCobDate {
            number: "RITM1".to_string(),
            date: "bogus".to_string(),
        };
        let app_error = AppError::Roll(roll_error);
        assert_eq!(app_error.category(), "roll");
    }
}
