//! Command handlers for RITM Roller CLI
//!
//! Each handler resolves its paths from the CLI arguments and the loaded
//! configuration, runs one pipeline stage, and prints an operator-facing
//! summary.

use std::path::PathBuf;

use tracing::info;

use crate::app::{filter_records, load_open_dates, LineParser, Record, RecordSet, Roller};
use crate::cli::{FilterArgs, ParseArgs, RollArgs, RunArgs};
use crate::config::AppConfig;
use crate::errors::Result;

/// Handle the parse command
pub fn handle_parse(args: ParseArgs, config: &AppConfig) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| config.paths.records.clone());
    info!(
        "Parsing {} into {}",
        args.input.display(),
        output.display()
    );

    let parser = LineParser::with_vocabulary(config.parser.category_words.clone());
    let (records, stats) = parser.parse_file(&args.input)?;
    RecordSet::new(records).persist(&output)?;

    println!("Parsed {} -> {}", args.input.display(), output.display());
    println!("  Lines processed : {}", stats.lines_processed);
    println!("  Records         : {}", stats.accepted);
    println!("  Blank lines     : {}", stats.blank_lines);
    println!("  Rejected lines  : {}", stats.rejected_lines);
    Ok(())
}

/// Handle the filter command
pub fn handle_filter(args: FilterArgs, config: &AppConfig) -> Result<()> {
    let records_path = args
        .records
        .unwrap_or_else(|| config.paths.records.clone());
    let open_dates_path = args
        .open_dates
        .unwrap_or_else(|| config.paths.open_dates.clone());
    let output = args
        .output
        .unwrap_or_else(|| config.paths.valid_records.clone());

    let open_dates = load_open_dates(&open_dates_path)?;
    let set = RecordSet::load(&records_path)?;
    let total = set.len();

    let valid = filter_records(set.records, &open_dates);
    let valid_count = valid.len();
    print_valid_records(&valid);
    RecordSet::new(valid).persist(&output)?;

    println!("Summary:");
    println!("  Total records   : {}", total);
    println!("  Valid records   : {}", valid_count);
    println!("  Invalid records : {}", total - valid_count);
    println!("  Output          : {}", output.display());
    Ok(())
}

fn print_valid_records(records: &[Record]) {
    if records.is_empty() {
        return;
    }
    println!("Valid RITM numbers:");
    for record in records {
        println!(
            "  - {} (Date: {})",
            record.number, record.u_desired_completion_date
        );
    }
}

/// Handle the roll command
pub fn handle_roll(args: RollArgs, config: &AppConfig) -> Result<()> {
    let records_path = args
        .records
        .clone()
        .unwrap_or_else(|| config.paths.valid_records.clone());
    let set = RecordSet::load(&records_path)?;
    if set.is_empty() {
        println!("No records found in {}", records_path.display());
        return Ok(());
    }

    let roller = build_roller(
        args.staging_dir.clone(),
        args.output_root.clone(),
        config,
    );
    let summary = roller.roll(&set.records, args.date_policy())?;
    print_roll_summary(&roller, &summary, set.len());
    Ok(())
}

/// Handle the run command: parse, filter, and roll without intermediate
/// files
pub fn handle_run(args: RunArgs, config: &AppConfig) -> Result<()> {
    let parser = LineParser::with_vocabulary(config.parser.category_words.clone());
    let (records, stats) = parser.parse_file(&args.input)?;
    println!(
        "Parsed {} records from {} lines ({} rejected)",
        stats.accepted, stats.lines_processed, stats.rejected_lines
    );

    if let Some(records_out) = &args.records_out {
        RecordSet::new(records.clone()).persist(records_out)?;
    }

    let open_dates_path = args
        .open_dates
        .clone()
        .unwrap_or_else(|| config.paths.open_dates.clone());
    let open_dates = load_open_dates(&open_dates_path)?;

    let total = records.len();
    let valid = filter_records(records, &open_dates);
    println!("Retained {} of {} records after date filter", valid.len(), total);

    if valid.is_empty() {
        println!("Nothing to roll.");
        return Ok(());
    }

    let roller = build_roller(
        args.staging_dir.clone(),
        args.output_root.clone(),
        config,
    );
    let summary = roller.roll(&valid, args.date_policy())?;
    print_roll_summary(&roller, &summary, valid.len());
    Ok(())
}

fn build_roller(
    staging_dir: Option<PathBuf>,
    output_root: Option<PathBuf>,
    config: &AppConfig,
) -> Roller {
    Roller::new(
        staging_dir.unwrap_or_else(|| config.paths.staging_dir.clone()),
        output_root.unwrap_or_else(|| config.paths.output_root.clone()),
        config.paths.manifest_name.clone(),
    )
}

fn print_roll_summary(roller: &Roller, summary: &crate::app::RollSummary, record_count: usize) {
    let group_count = summary.published.len() + summary.skipped_empty.len();
    println!(
        "\nFound {} record(s) across {} COB date(s).\n",
        record_count, group_count
    );

    for group in &summary.published {
        println!("{}", "=".repeat(60));
        println!("  COB Date   : {}", group.cob_date);
        println!("  RITMs      : {}", group.ritms.join(", "));
        println!("  Files      : {}", group.file_count);
        println!(
            "  Copied {}  ->  {}",
            roller.manifest_name,
            group.dest.display()
        );
        println!("{}", "=".repeat(60));
    }

    for cob_date in &summary.skipped_empty {
        println!("  COB {}: no files listed - skipped", cob_date);
    }

    if summary.records_skipped > 0 {
        println!(
            "  {} record(s) skipped for malformed completion dates",
            summary.records_skipped
        );
    }
}
