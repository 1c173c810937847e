//! Command-line argument parsing for RITM Roller
//!
//! Defines the CLI structure with clap derive macros: one subcommand per
//! pipeline stage plus a chained `run`, with positional paths defaulting to
//! the configured locations.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::DatePolicy;

/// RITM Roller - reconstruct, filter, and roll RITM request records
#[derive(Parser, Debug)]
#[command(
    name = "ritm_roller",
    version,
    about = "Parse RITM request lines, filter by open COB dates, and publish per-date DEALS.DAT manifests",
    long_about = "A pipeline for semi-structured RITM request lines: the parse stage reconstructs \
typed records from raw text, the filter stage retains records whose completion date is open, and \
the roll stage groups records by COB date and publishes one manifest per date."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse raw request lines into structured records
    Parse(ParseArgs),

    /// Filter structured records against the open-dates file
    Filter(FilterArgs),

    /// Group records by COB date and publish manifests
    Roll(RollArgs),

    /// Run the full pipeline: parse, filter, roll
    Run(RunArgs),
}

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Raw input file, one request per line
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Structured-record output file [default: records.json]
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Arguments for the filter command
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Structured-record input file [default: records.json]
    #[arg(value_name = "RECORDS")]
    pub records: Option<PathBuf>,

    /// Open-dates file, one YYYY/MM/DD date per line [default: open_dates.txt]
    #[arg(value_name = "OPEN_DATES")]
    pub open_dates: Option<PathBuf>,

    /// Filtered-record output file [default: valid_ritm.json]
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Arguments for the roll command
#[derive(Args, Debug)]
pub struct RollArgs {
    /// Structured-record input file [default: valid_ritm.json]
    #[arg(value_name = "RECORDS")]
    pub records: Option<PathBuf>,

    /// Destination root for per-date manifest directories
    #[arg(long, value_name = "DIR")]
    pub output_root: Option<PathBuf>,

    /// Staging directory for the shared manifest
    #[arg(long, value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Abort on a malformed completion date instead of skipping the record
    #[arg(long)]
    pub strict_dates: bool,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Raw input file, one request per line
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Open-dates file [default: open_dates.txt]
    #[arg(value_name = "OPEN_DATES")]
    pub open_dates: Option<PathBuf>,

    /// Also persist the parsed record set to this file
    #[arg(long, value_name = "FILE")]
    pub records_out: Option<PathBuf>,

    /// Destination root for per-date manifest directories
    #[arg(long, value_name = "DIR")]
    pub output_root: Option<PathBuf>,

    /// Staging directory for the shared manifest
    #[arg(long, value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Abort on a malformed completion date instead of skipping the record
    #[arg(long)]
    pub strict_dates: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

impl RollArgs {
    /// Policy for malformed completion dates
    pub fn date_policy(&self) -> DatePolicy {
        if self.strict_dates {
            DatePolicy::Strict
        } else {
            DatePolicy::Skip
        }
    }
}

impl RunArgs {
    /// Policy for malformed completion dates
    pub fn date_policy(&self) -> DatePolicy {
        if self.strict_dates {
            DatePolicy::Strict
        } else {
            DatePolicy::Skip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        let cli_quiet = Cli {
            global: GlobalArgs {
                verbose: false,
                very_verbose: false,
                quiet: true,
                config: None,
            },
            command: Commands::Roll(RollArgs {
                records: None,
                output_root: None,
                staging_dir: None,
                strict_dates: false,
            }),
        };

        let cli_verbose = Cli {
            global: GlobalArgs {
                verbose: true,
                very_verbose: false,
                quiet: false,
                config: None,
            },
            command: Commands::Roll(RollArgs {
                records: None,
                output_root: None,
                staging_dir: None,
                strict_dates: false,
            }),
        };

        assert_eq!(cli_quiet.log_level(), tracing::Level::ERROR);
        assert_eq!(cli_verbose.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_date_policy_selection() {
        let strict = RollArgs {
            records: None,
            output_root: None,
            staging_dir: None,
            strict_dates: true,
        };
        let lenient = RollArgs {
            records: None,
            output_root: None,
            staging_dir: None,
            strict_dates: false,
        };

        assert_eq!(strict.date_policy(), DatePolicy::Strict);
        assert_eq!(lenient.date_policy(), DatePolicy::Skip);
    }

    #[test]
    fn test_parse_subcommand_args() {
        let cli = Cli::try_parse_from(["ritm_roller", "parse", "data.txt", "out.json"]).unwrap();
        match cli.command {
            Commands::Parse(args) => {
                assert_eq!(args.input, PathBuf::from("data.txt"));
                assert_eq!(args.output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected parse subcommand"),
        }
    }

    #[test]
    fn test_filter_defaults_left_unset() {
        let cli = Cli::try_parse_from(["ritm_roller", "filter"]).unwrap();
        match cli.command {
            Commands::Filter(args) => {
                assert!(args.records.is_none());
                assert!(args.open_dates.is_none());
                assert!(args.output.is_none());
            }
            _ => panic!("expected filter subcommand"),
        }
    }
}
