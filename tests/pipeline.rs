//! End-to-end pipeline tests
//!
//! Exercises parse -> filter -> roll over real temporary directories, the
//! way the binary drives the stages through the library API.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use ritm_roller::app::{
    filter_records, load_open_dates, DatePolicy, LineParser, RecordSet, Roller,
};

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn parse_reconstructs_the_reference_line() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "data.txt",
        "RITM0012345 Risk Rolling JOHN SMITH 01/03/2024 10:15:00 02/03/2024 11:00:00 \
         05/03/2024 please process ORDERBOOK.DAT and Orderbook.dat again\n",
    );

    let parser = LineParser::new();
    let (records, stats) = parser.parse_file(&input).unwrap();

    assert_eq!(stats.accepted, 1);
    let record = &records[0];
    assert_eq!(record.number, "RITM0012345");
    assert_eq!(record.cat_item, "Risk Rolling");
    assert_eq!(record.requested_for, "JOHN SMITH");
    assert_eq!(record.opened_at, "2024/03/01 10:15:00");
    assert_eq!(record.u_desired_completion_date, "2024/03/05");
    assert_eq!(record.files, vec!["ORDERBOOK.DAT"]);
}

#[test]
fn filter_retains_exact_date_matches_only() {
    let dir = TempDir::new().unwrap();
    let open_dates_path = write_file(dir.path(), "open_dates.txt", "2024/03/05\n");
    let open_dates = load_open_dates(&open_dates_path).unwrap();

    let input = write_file(
        dir.path(),
        "data.txt",
        "RITM0000001 Risk Rolling JOHN SMITH 01/03/2024 10:15:00 02/03/2024 11:00:00 \
         05/03/2024 send A.DAT\n\
         RITM0000002 Risk Rolling JANE DOE 01/03/2024 10:15:00 02/03/2024 11:00:00 \
         06/03/2024 send B.DAT\n",
    );

    let parser = LineParser::new();
    let (records, _) = parser.parse_file(&input).unwrap();
    let valid = filter_records(records, &open_dates);

    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].number, "RITM0000001");
}

#[test]
fn roll_merges_groups_and_dedups_files() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "data.txt",
        "RITM0000001 Risk Rolling JOHN SMITH 01/03/2024 10:15:00 02/03/2024 11:00:00 \
         05/03/2024 send A.DAT and B.DAT\n\
         RITM0000002 Risk Rolling JANE DOE 01/03/2024 10:15:00 02/03/2024 11:00:00 \
         05/03/2024 send B.DAT and C.DAT\n",
    );

    let parser = LineParser::new();
    let (records, _) = parser.parse_file(&input).unwrap();

    let roller = Roller::new(
        dir.path().join("tmp"),
        dir.path().join("w_bypass"),
        "DEALS.DAT",
    );
    let summary = roller.roll(&records, DatePolicy::Skip).unwrap();

    assert_eq!(summary.published.len(), 1);
    let group = &summary.published[0];
    assert_eq!(group.cob_date, "20240305");
    assert_eq!(group.ritms, vec!["RITM0000001", "RITM0000002"]);

    let manifest = fs::read_to_string(dir.path().join("w_bypass/20240305/DEALS.DAT")).unwrap();
    assert_eq!(manifest, "A.DAT\nB.DAT\nC.DAT\n");
}

#[test]
fn roll_skips_fileless_group_but_publishes_the_rest() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "data.txt",
        "RITM0000001 Risk Rolling JOHN SMITH 01/03/2024 10:15:00 02/03/2024 11:00:00 \
         05/03/2024 nothing attached here\n\
         RITM0000002 Risk Rolling JANE DOE 01/03/2024 10:15:00 02/03/2024 11:00:00 \
         06/03/2024 send D.DAT\n",
    );

    let parser = LineParser::new();
    let (records, _) = parser.parse_file(&input).unwrap();

    let roller = Roller::new(
        dir.path().join("tmp"),
        dir.path().join("w_bypass"),
        "DEALS.DAT",
    );
    let summary = roller.roll(&records, DatePolicy::Skip).unwrap();

    assert_eq!(summary.skipped_empty, vec!["20240305"]);
    assert!(!dir.path().join("w_bypass/20240305").exists());
    assert!(dir.path().join("w_bypass/20240306/DEALS.DAT").exists());
}

#[test]
fn short_line_is_dropped_and_later_lines_survive() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "data.txt",
        "RITM0000001 Risk Rolling JOHN 01/03/2024\n\
         RITM0000002 Risk Rolling JANE DOE 01/03/2024 10:15:00 02/03/2024 11:00:00 \
         06/03/2024 send D.DAT\n",
    );

    let parser = LineParser::new();
    let (records, stats) = parser.parse_file(&input).unwrap();

    assert_eq!(stats.rejected_lines, 1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].number, "RITM0000002");
}

#[test]
fn full_pipeline_via_intermediate_files() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "data.txt",
        "RITM0000001 Risk Rolling JOHN SMITH 01/03/2024 10:15:00 02/03/2024 11:00:00 \
         05/03/2024 send A.DAT\n\
         RITM0000002 Risk Rolling JANE DOE 01/03/2024 10:15:00 02/03/2024 11:00:00 \
         06/03/2024 send B.DAT\n\
         RITM0000003 Risk Rolling MARY JONES 01/03/2024 10:15:00 02/03/2024 11:00:00 \
         05/03/2024 send C.DAT and a.dat\n",
    );
    let open_dates_path = write_file(dir.path(), "open_dates.txt", "2024/03/05\n\n2024/03/09\n");

    // Stage 1: parse and persist
    let records_path = dir.path().join("records.json");
    let parser = LineParser::new();
    let (records, _) = parser.parse_file(&input).unwrap();
    RecordSet::new(records).persist(&records_path).unwrap();

    // Stage 2: filter from the persisted set and persist again
    let open_dates = load_open_dates(&open_dates_path).unwrap();
    let set = RecordSet::load(&records_path).unwrap();
    let valid = filter_records(set.records, &open_dates);
    let valid_path = dir.path().join("valid_ritm.json");
    RecordSet::new(valid).persist(&valid_path).unwrap();

    // Stage 3: roll from the filtered set
    let set = RecordSet::load(&valid_path).unwrap();
    let roller = Roller::new(
        dir.path().join("tmp"),
        dir.path().join("w_bypass"),
        "DEALS.DAT",
    );
    let summary = roller.roll(&set.records, DatePolicy::Skip).unwrap();

    assert_eq!(summary.published.len(), 1);
    assert_eq!(summary.published[0].ritms, vec!["RITM0000001", "RITM0000003"]);

    // Group-level dedup is exact-match, so A.DAT and a.dat from different
    // records both survive
    let manifest = fs::read_to_string(dir.path().join("w_bypass/20240305/DEALS.DAT")).unwrap();
    assert_eq!(manifest, "A.DAT\nC.DAT\na.dat\n");

    let published_dates: HashSet<String> = fs::read_dir(dir.path().join("w_bypass"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(published_dates, HashSet::from(["20240305".to_string()]));
}
