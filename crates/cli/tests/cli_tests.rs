use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("dealherald").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Posts new game deals to a Discord channel"));
}

#[test]
fn test_run_help_mentions_dry_run() {
    let mut cmd = Command::cargo_bin("dealherald").unwrap();
    cmd.arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dry-run"));
}

#[test]
fn test_stats_on_fresh_history() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let history_file = temp_dir.path().join("deal-history.json");

    let mut cmd = Command::cargo_bin("dealherald").unwrap();
    cmd.env("HISTORY_FILE", &history_file)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tracked\": 0"));
}

#[test]
fn test_stats_survives_corrupt_history() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let history_file = temp_dir.path().join("deal-history.json");
    std::fs::write(&history_file, "{ definitely not json").unwrap();

    let mut cmd = Command::cargo_bin("dealherald").unwrap();
    cmd.env("HISTORY_FILE", &history_file)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tracked\": 0"));
}

#[test]
fn test_clear_writes_an_empty_history_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let history_file = temp_dir.path().join("deal-history.json");
    std::fs::write(
        &history_file,
        r#"{"postedDeals":{"abc-5":1700000000000},"lastRotation":1700000000000}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("dealherald").unwrap();
    cmd.env("HISTORY_FILE", &history_file).arg("clear").assert().success();

    let raw = std::fs::read_to_string(&history_file).unwrap();
    assert!(raw.contains("\"postedDeals\": {}"));
}
