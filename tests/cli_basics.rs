mod common;
use common::psql_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_command() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Pervasive SQL dialect and ODBC driver adapter",
        ));
}

#[test]
fn test_version_command() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("psql_dialect"));
}

#[test]
fn test_invalid_subcommand() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_missing_subcommand() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: psql_dialect"));
}

#[test]
fn test_presets_lists_pervasive10() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pervasive10"))
        .stdout(predicate::str::contains("dialect: pervasive"))
        .stdout(predicate::str::contains("driver: pervasive-odbc"));
}

#[test]
fn test_unknown_preset_fails() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .args(["--preset", "oracle", "capabilities"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("oracle"));
}
