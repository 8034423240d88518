mod common;
use common::psql_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_types_resolves_bounded_template() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .args(["types", "--type", "AnsiString", "--length", "40"])
        .assert()
        .success()
        .stdout("VARCHAR($l)\n");
}

#[test]
fn test_types_falls_through_to_next_bound() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .args(["types", "--type", "AnsiString", "--length", "9000"])
        .assert()
        .success()
        .stdout("LONGVARCHAR\n");
}

#[test]
fn test_types_without_length_uses_default() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .args(["types", "--type", "ansi_string"])
        .assert()
        .success()
        .stdout("VARCHAR(255)\n");
}

#[test]
fn test_types_unmapped_fails() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .args(["types", "--type", "Xml"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Xml"));
}

#[test]
fn test_types_unknown_name_fails() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .args(["types", "--type", "Widget"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Widget"));
}

#[test]
fn test_types_lists_table() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("TEMPLATE"))
        .stdout(predicate::str::contains("UNIQUEIDENTIFIER"))
        .stdout(predicate::str::contains("VARCHAR($l)"));
}

#[test]
fn test_capabilities_output() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .arg("capabilities")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dialect: pervasive"))
        .stdout(predicate::str::contains("identity_select_string = \"SELECT @@IDENTITY\""))
        .stdout(predicate::str::contains("temporary_table_name(Orders) = \"#Orders\""))
        .stdout(predicate::str::contains("schema_introspection = unsupported"))
        .stdout(predicate::str::contains("Driver: pervasive-odbc"))
        .stdout(predicate::str::contains("parameter_name(0) = \"?\""));
}

#[test]
fn test_capabilities_via_alias() {
    let dir = tempdir().unwrap();
    psql_cmd(&dir)
        .args(["--preset", "ACTIAN-PSQL", "capabilities", "--table", "Staging"])
        .assert()
        .success()
        .stdout(predicate::str::contains("temporary_table_name(Staging) = \"#Staging\""));
}
