//! Command-line interface components
//!
//! Argument parsing and per-subcommand handlers for the RITM Roller
//! application.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, FilterArgs, GlobalArgs, ParseArgs, RollArgs, RunArgs};
pub use commands::{handle_filter, handle_parse, handle_roll, handle_run};
