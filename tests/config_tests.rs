mod common;
use common::psql_cmd;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

#[test]
#[serial]
fn test_config_generation() {
    let temp_dir = tempdir().unwrap();

    psql_cmd(&temp_dir)
        .args(["config", "--output", "test-config.toml"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("test-config.toml")).unwrap();
    assert!(content.contains("[connection]"));
    assert!(content.contains("[dialect]"));
    assert!(content.contains("Pervasive10"));
}

#[test]
#[serial]
fn test_config_generation_with_env() {
    let temp_dir = tempdir().unwrap();

    psql_cmd(&temp_dir)
        .args(["config", "--for-env", "test"])
        .assert()
        .success();

    assert!(temp_dir.path().join("config.toml").exists());
    assert!(temp_dir.path().join("config/test.toml").exists());
}

#[test]
#[serial]
fn test_generated_config_round_trips_through_connstr() {
    let temp_dir = tempdir().unwrap();

    psql_cmd(&temp_dir).arg("config").assert().success();

    psql_cmd(&temp_dir)
        .args(["connstr", "--database", "DEMODATA"])
        .assert()
        .success()
        .stdout("Server Name=;Database Name=DEMODATA;User ID=;Password=\n");
}
