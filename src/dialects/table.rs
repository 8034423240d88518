use crate::dialects::base::{DatabaseDialect, DetectionResult, DialectConfig, DialectError};
use crate::dialects::types::TypeRegistry;
use log::{debug, warn};
use regex::Regex;

/// A dialect whose whole behavior comes from a [`DialectConfig`] data table.
///
/// Dialects differ only in the table they are built from; the resolution and
/// detection logic is shared.
pub struct TableDialect {
    config: DialectConfig,
    types: TypeRegistry,
    patterns: Vec<Regex>,
}

impl TableDialect {
    pub fn new(config: DialectConfig) -> Result<Self, DialectError> {
        let types: TypeRegistry = config.types.iter().cloned().collect();

        let patterns = config
            .detection
            .connection_patterns
            .iter()
            .map(|pattern| {
                Regex::new(&format!("(?i){}", pattern)).map_err(|e| {
                    DialectError::ConfigError(format!(
                        "invalid detection pattern '{}' for dialect {}: {}",
                        pattern, config.metadata.name, e
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if types.is_empty() {
            warn!("Dialect '{}' registers no column types", config.metadata.name);
        }
        debug!(
            "Built dialect '{}' with {} column types and {} detection patterns",
            config.metadata.name,
            types.len(),
            patterns.len()
        );

        Ok(Self { config, types, patterns })
    }

    /// Parse a dialect data table from TOML.
    pub fn from_toml(source: &str) -> Result<Self, DialectError> {
        let config: DialectConfig = toml::from_str(source)
            .map_err(|e| DialectError::ConfigError(format!("invalid dialect table: {}", e)))?;
        Self::new(config)
    }
}

impl DatabaseDialect for TableDialect {
    fn config(&self) -> &DialectConfig {
        &self.config
    }

    fn type_registry(&self) -> &TypeRegistry {
        &self.types
    }

    fn detect(&self, connection_string: &str) -> Option<DetectionResult> {
        // Earlier patterns are more specific and score higher.
        let total = self.patterns.len().max(1) as f32;
        self.patterns
            .iter()
            .enumerate()
            .find(|(_, re)| re.is_match(connection_string))
            .map(|(index, re)| DetectionResult {
                dialect_name: self.name().to_string(),
                confidence: 0.9 - 0.4 * (index as f32 / total),
                matched_pattern: re.as_str().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialects::types::DbType;

    const MINIMAL: &str = r#"
[metadata]
name = "tiny"
version = "1"
aliases = ["t"]
description = "test dialect"

[detection]
connection_patterns = ["tiny="]

[capabilities]
supports_identity_columns = false
identity_select_string = "SELECT LAST_ID()"
identity_column_string = "AUTO"
has_data_type_in_identity_column = true
add_column_string = "add"
qualify_index_name = true
drop_primary_key_string = " drop constraint {constraint}"
supports_temporary_tables = false
temporary_table_prefix = "tmp_"

[sql]
quote_identifier = "`"
escape_identifier = "``"
current_timestamp = "NOW()"
boolean_true = "TRUE"
boolean_false = "FALSE"

[[types]]
type = "Int32"
template = "INT"
"#;

    #[test]
    fn builds_from_toml() {
        let dialect = TableDialect::from_toml(MINIMAL).unwrap();

        assert_eq!(dialect.name(), "tiny");
        assert_eq!(dialect.column_type(DbType::Int32, None).unwrap(), "INT");
        assert!(dialect.column_type(DbType::String, Some(10)).is_err());
        assert!(!dialect.supports_identity_columns());
        assert!(dialect.qualify_index_name());
    }

    #[test]
    fn drop_primary_key_substitutes_constraint_name() {
        let dialect = TableDialect::from_toml(MINIMAL).unwrap();
        assert_eq!(
            dialect.drop_primary_key_constraint_string("pk_users"),
            " drop constraint pk_users"
        );
    }

    #[test]
    fn quotes_identifiers_with_dialect_quote() {
        let dialect = TableDialect::from_toml(MINIMAL).unwrap();
        assert_eq!(dialect.quote_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn detection_is_case_insensitive() {
        let dialect = TableDialect::from_toml(MINIMAL).unwrap();

        let result = dialect.detect("TINY=1;x=2").unwrap();
        assert_eq!(result.dialect_name, "tiny");
        assert!(result.confidence > 0.5);
        assert!(dialect.detect("Driver=other").is_none());
    }

    #[test]
    fn rejects_invalid_detection_pattern() {
        let broken = MINIMAL.replace("\"tiny=\"", "\"(unclosed\"");
        assert!(matches!(
            TableDialect::from_toml(&broken),
            Err(DialectError::ConfigError(_))
        ));
    }

    #[test]
    fn rejects_unknown_type_names() {
        let broken = MINIMAL.replace("type = \"Int32\"", "type = \"Integer\"");
        assert!(matches!(
            TableDialect::from_toml(&broken),
            Err(DialectError::ConfigError(_))
        ));
    }
}
