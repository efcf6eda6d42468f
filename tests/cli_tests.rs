//! End-to-end tests of the `autodiary` binary.


use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;
use test_helpers::{base_autodiary_command, date, entry, write_diary};

#[test]
fn test_cli_no_args_shows_usage() {
    let dir = tempdir().unwrap();
    base_autodiary_command(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_init_creates_table_once() {
    let dir = tempdir().unwrap();
    let diary_dir = dir.path().join("diary");

    base_autodiary_command(dir.path())
        .env("AUTODIARY_DIR", &diary_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created an empty diary"));

    let content = fs::read_to_string(diary_dir.join("diary-data.csv")).unwrap();
    assert_eq!(
        content.trim_end(),
        "date,year,month,weekday,summary,happiness,duration,people"
    );

    base_autodiary_command(dir.path())
        .env("AUTODIARY_DIR", &diary_dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_cli_missing_table_suggests_init() {
    let dir = tempdir().unwrap();
    base_autodiary_command(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("autodiary init"));
}

#[test]
fn test_cli_relative_dir_is_rejected() {
    let dir = tempdir().unwrap();
    base_autodiary_command(dir.path())
        .env("AUTODIARY_DIR", "relative/diary")
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute path"));
}

#[test]
fn test_cli_status_lists_missing_days() {
    let dir = tempdir().unwrap();
    write_diary(dir.path(), &[entry(date(2021, 1, 1), None, None, None, &[])]);

    base_autodiary_command(dir.path())
        .args(["status", "--today", "2021-01-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Last entry: 01/01/2021"))
        .stdout(predicate::str::contains("Missing days: 2"))
        .stdout(predicate::str::contains("01/03/2021"))
        .stdout(predicate::str::contains("Today recorded: no"));
}

#[test]
fn test_cli_update_with_scripted_input() {
    let dir = tempdir().unwrap();
    let path = write_diary(dir.path(), &[entry(date(2021, 1, 1), None, None, None, &[])]);

    // One missed day, then a yes to skipping today.
    base_autodiary_command(dir.path())
        .args(["update", "--today", "2021-01-03"])
        .write_stdin("ran\nworked\nread\ngood\n4.5\n\nAlice Smith\n\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded 01/02/2021"))
        .stdout(predicate::str::contains("today was skipped"));

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("01/02/2021,2021,January,Saturday,\"This morning, I ran"));
    assert!(content.contains(",4.5,,Alice Smith"));
}

#[test]
fn test_cli_update_rejects_clock_behind_diary() {
    let dir = tempdir().unwrap();
    write_diary(dir.path(), &[entry(date(2021, 1, 5), None, None, None, &[])]);

    base_autodiary_command(dir.path())
        .args(["update", "--today", "2021-01-04"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Check the system clock"));
}

#[test]
fn test_cli_search_writes_report() {
    let dir = tempdir().unwrap();
    write_diary(
        dir.path(),
        &[
            entry(date(2021, 6, 1), Some("Went to the BEACH"), None, None, &[]),
            entry(date(2021, 6, 2), Some("Stayed home"), None, None, &[]),
        ],
    );
    let reports = dir.path().join("reports");

    base_autodiary_command(dir.path())
        .env("AUTODIARY_REPORTS_DIR", &reports)
        .args(["search", "beach"])
        .assert()
        .success()
        .stdout(predicate::str::contains("06/01/2021: Went to the BEACH"))
        .stdout(predicate::str::contains("Stayed home").not());

    assert!(reports.join("beach.csv").exists());

    base_autodiary_command(dir.path())
        .env("AUTODIARY_REPORTS_DIR", &reports)
        .args(["search", "desert"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results"));
    assert!(!reports.join("desert.csv").exists());
}

#[test]
fn test_cli_stats_prints_totals_and_json() {
    let dir = tempdir().unwrap();
    write_diary(
        dir.path(),
        &[
            entry(date(2019, 12, 31), None, Some("2.0"), Some("1:30:00"), &[]),
            entry(date(2020, 1, 1), None, Some("4.0"), Some("0:45:00"), &["Ann Lee"]),
        ],
    );

    base_autodiary_command(dir.path())
        .args(["stats", "--today", "2021-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total entries: 2"))
        .stdout(predicate::str::contains("Total recordings: 2"))
        .stdout(predicate::str::contains("Total length: 2:15:00"));

    assert!(dir.path().join("statistics.csv").exists());

    let output = base_autodiary_command(dir.path())
        .args(["stats", "--json", "--today", "2021-03-01"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totals"]["entries"], 2);
    assert_eq!(json["totals"]["total_duration"], "2:15:00");
    assert_eq!(json["years"][0]["year"], 2020);
    assert_eq!(json["years"][0]["people"][0]["name"], "Ann Lee");
}

#[test]
fn test_cli_year_json() {
    let dir = tempdir().unwrap();
    write_diary(
        dir.path(),
        &[entry(date(2020, 3, 1), None, Some("3.5"), None, &["bob jones"])],
    );

    let output = base_autodiary_command(dir.path())
        .args(["year", "2020", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["mean_happiness"], 3.5);
    assert_eq!(json["months"][0]["label"], "March");
    assert_eq!(json["months"][11]["mean"], serde_json::Value::Null);
    assert_eq!(json["people"][0]["name"], "Bob Jones");
}

#[test]
fn test_cli_scrub_and_rename() {
    let dir = tempdir().unwrap();
    let path = write_diary(
        dir.path(),
        &[entry(
            date(2021, 1, 1),
            Some("Lunch with Jon [tbd]"),
            None,
            None,
            &["Jon Smith"],
        )],
    );

    base_autodiary_command(dir.path())
        .args(["scrub", " [tbd]"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from 1 summaries"));

    base_autodiary_command(dir.path())
        .args(["rename-person", "Jon", "John"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in 1 entries"));

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains(",Lunch with Jon,,,John Smith"));
}

#[test]
fn test_cli_import_and_write() {
    let dir = tempdir().unwrap();
    let export = dir.path().join("export.csv");
    fs::write(&export, "01/01/2014,Walk,4.0,,Alice\n01/02/2014,Read,,,\n").unwrap();
    let target = dir.path().join("imported.csv");

    base_autodiary_command(dir.path())
        .arg("import")
        .arg(&export)
        .arg("--write")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 entries"))
        .stdout(predicate::str::contains("2014: 2 entries"));

    assert!(fs::read_to_string(target)
        .unwrap()
        .contains("01/01/2014,2014,January,Wednesday,Walk,4.0,,Alice"));
}
