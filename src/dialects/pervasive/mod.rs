//! Pervasive SQL / Actian PSQL dialect.

use crate::dialects::table::TableDialect;
use std::sync::{Arc, OnceLock};

static DIALECT: OnceLock<Arc<TableDialect>> = OnceLock::new();

/// The Pervasive dialect built from its embedded data table.
pub fn dialect() -> Arc<TableDialect> {
    DIALECT
        .get_or_init(|| {
            let config_str = include_str!("dialect.toml");
            Arc::new(TableDialect::from_toml(config_str).expect("Failed to parse Pervasive dialect config"))
        })
        .clone()
}
