//! Tests against a live Pervasive server. Run with
//! `cargo test --features integration` and `PSQL_TEST_CONNECTION` set to a
//! Pervasive connection string.
#![cfg(feature = "integration")]

use psql_dialect::executor::{ConnectionManager, DatabaseExecutor};
use psql_dialect::persistence::PersistenceConfiguration;
use psql_dialect::{DatabaseDialect, DbType};

fn connection_string() -> Option<String> {
    std::env::var("PSQL_TEST_CONNECTION").ok()
}

#[test]
fn test_ping_live_server() {
    let Some(conn) = connection_string() else {
        eprintln!("PSQL_TEST_CONNECTION not set, skipping");
        return;
    };

    let settings = PersistenceConfiguration::pervasive10()
        .connection_string(|c| {
            c.connection_string(&conn);
        })
        .build();
    let manager = ConnectionManager::new().unwrap();

    manager.test_connection(&settings, 10).unwrap();
}

#[test]
fn test_identity_query_runs() {
    let Some(conn) = connection_string() else {
        eprintln!("PSQL_TEST_CONNECTION not set, skipping");
        return;
    };

    let settings = PersistenceConfiguration::pervasive10()
        .connection_string(|c| {
            c.connection_string(&conn);
        })
        .build();
    let manager = ConnectionManager::new().unwrap();
    let connection = manager.connect(&settings, 10).unwrap();
    let mut executor = DatabaseExecutor::new(connection);

    let value = executor
        .query_single_value(settings.dialect().identity_select_string())
        .unwrap();
    assert!(value.is_some());
}

#[test]
fn test_identity_round_trip_in_temporary_table() {
    let Some(conn) = connection_string() else {
        eprintln!("PSQL_TEST_CONNECTION not set, skipping");
        return;
    };

    let settings = PersistenceConfiguration::pervasive10()
        .connection_string(|c| {
            c.connection_string(&conn);
        })
        .build();
    let dialect = settings.dialect();
    let manager = ConnectionManager::new().unwrap();
    let connection = manager.connect(&settings, 10).unwrap();
    let mut executor = DatabaseExecutor::new(connection);

    let table = dialect.temporary_table_name("psql_it_orders");
    let name_type = dialect
        .column_type(DbType::AnsiString, Some(40))
        .unwrap()
        .replace("$l", "40");
    executor
        .execute(&format!(
            "CREATE TABLE {} (id {}, name {})",
            table,
            dialect.identity_column_string(),
            name_type
        ))
        .unwrap();
    executor
        .execute(&format!("INSERT INTO {} (name) VALUES ('first')", table))
        .unwrap();

    let identity = executor.last_identity(dialect).unwrap();
    assert_eq!(identity.as_deref(), Some("1"));

    let rows = executor
        .query_rows(&format!("SELECT id, name FROM {}", table))
        .unwrap();
    assert_eq!(rows, vec![vec!["1".to_string(), "first".to_string()]]);
}
