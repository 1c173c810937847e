//! RITM Roller CLI application
//!
//! Command-line interface for the RITM request pipeline: parse raw request
//! lines, filter by open COB dates, and publish per-date manifests.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use ritm_roller::cli::{handle_filter, handle_parse, handle_roll, handle_run, Cli, Commands};
use ritm_roller::config::AppConfig;
use ritm_roller::errors::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(&cli);
    info!("RITM Roller v{} starting", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_default(cli.global.config.as_deref())?;

    match cli.command {
        Commands::Parse(args) => {
            info!("Executing parse command");
            handle_parse(args, &config)
        }
        Commands::Filter(args) => {
            info!("Executing filter command");
            handle_filter(args, &config)
        }
        Commands::Roll(args) => {
            info!("Executing roll command");
            handle_roll(args, &config)
        }
        Commands::Run(args) => {
            info!("Executing run command");
            handle_run(args, &config)
        }
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("ritm_roller={}", log_level).parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();
}
