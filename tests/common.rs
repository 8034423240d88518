#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use tempfile::{TempDir, tempdir};

/// Returns a configured Command for `psql_dialect`, run from an empty
/// directory so no stray config file is picked up.
pub fn psql_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("psql_dialect").expect("Binary not found");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

/// Prepares a temp dir holding a config.toml with connection fields
pub fn setup_config_dir() -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    fs::write(
        temp_dir.path().join("config.toml"),
        r#"
[connection]
server = "db01"
database = "DEMODATA"
username = "Master"
password = "secret"

[connection.fields]
"Transport Hint" = "TCP"

[dialect]
preset = "psql"
"#,
    )
    .expect("Failed to write config.toml");
    temp_dir
}
