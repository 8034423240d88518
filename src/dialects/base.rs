use crate::dialects::types::{DbType, TypeMapping, TypeRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Data table describing one database dialect.
///
/// Every dialect ships one of these as an embedded TOML file; the behavior of
/// [`DatabaseDialect`] is derived entirely from it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialectConfig {
    pub metadata: DialectMetadata,
    pub detection: DetectionConfig,
    pub capabilities: Capabilities,
    pub sql: SqlConfig,
    #[serde(default)]
    pub types: Vec<TypeMapping>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialectMetadata {
    pub name: String,
    pub version: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub min_version: Option<String>,
    pub max_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetectionConfig {
    pub connection_patterns: Vec<String>,
}

/// Named SQL feature facts queried by a SQL generator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Capabilities {
    pub supports_identity_columns: bool,
    pub identity_select_string: String,
    pub identity_column_string: String,
    pub has_data_type_in_identity_column: bool,
    pub add_column_string: String,
    pub qualify_index_name: bool,
    /// `{constraint}` is replaced with the constraint name when present.
    pub drop_primary_key_string: String,
    pub supports_temporary_tables: bool,
    pub temporary_table_prefix: String,
    #[serde(default)]
    pub supports_schema_introspection: bool,
}

/// Literal value of one capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityValue {
    Flag(bool),
    Text(String),
}

impl fmt::Display for CapabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityValue::Flag(flag) => write!(f, "{}", flag),
            CapabilityValue::Text(text) => write!(f, "{:?}", text),
        }
    }
}

impl Capabilities {
    pub const NAMES: [&'static str; 10] = [
        "supports_identity_columns",
        "identity_select_string",
        "identity_column_string",
        "has_data_type_in_identity_column",
        "add_column_string",
        "qualify_index_name",
        "drop_primary_key_string",
        "supports_temporary_tables",
        "temporary_table_prefix",
        "supports_schema_introspection",
    ];

    /// Look a capability up by name.
    pub fn get(&self, name: &str) -> Option<CapabilityValue> {
        let value = match name {
            "supports_identity_columns" => CapabilityValue::Flag(self.supports_identity_columns),
            "identity_select_string" => CapabilityValue::Text(self.identity_select_string.clone()),
            "identity_column_string" => CapabilityValue::Text(self.identity_column_string.clone()),
            "has_data_type_in_identity_column" => {
                CapabilityValue::Flag(self.has_data_type_in_identity_column)
            }
            "add_column_string" => CapabilityValue::Text(self.add_column_string.clone()),
            "qualify_index_name" => CapabilityValue::Flag(self.qualify_index_name),
            "drop_primary_key_string" => CapabilityValue::Text(self.drop_primary_key_string.clone()),
            "supports_temporary_tables" => CapabilityValue::Flag(self.supports_temporary_tables),
            "temporary_table_prefix" => CapabilityValue::Text(self.temporary_table_prefix.clone()),
            "supports_schema_introspection" => {
                CapabilityValue::Flag(self.supports_schema_introspection)
            }
            _ => return None,
        };
        Some(value)
    }

    /// All capabilities as `(name, value)` pairs in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, CapabilityValue)> + '_ {
        Self::NAMES
            .iter()
            .filter_map(move |name| self.get(name).map(|value| (*name, value)))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqlConfig {
    pub quote_identifier: String,
    pub escape_identifier: String,
    pub current_timestamp: String,
    pub boolean_true: String,
    pub boolean_false: String,
}

/// Result of dialect detection
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub dialect_name: String,
    pub confidence: f32,
    pub matched_pattern: String,
}

/// Base trait that all database dialects must implement.
///
/// Only [`config`](DatabaseDialect::config) and
/// [`type_registry`](DatabaseDialect::type_registry) are required; every
/// capability answer is read from the dialect's data table.
pub trait DatabaseDialect: Send + Sync {
    /// Get the dialect configuration
    fn config(&self) -> &DialectConfig;

    /// Column type table built from `config().types`
    fn type_registry(&self) -> &TypeRegistry;

    fn name(&self) -> &str {
        &self.config().metadata.name
    }

    fn aliases(&self) -> &[String] {
        &self.config().metadata.aliases
    }

    fn capabilities(&self) -> &Capabilities {
        &self.config().capabilities
    }

    /// Detect if this dialect matches the given connection string
    fn detect(&self, connection_string: &str) -> Option<DetectionResult>;

    /// SQL type template for `ty` at `length`.
    fn column_type(&self, ty: DbType, length: Option<u32>) -> Result<&str, DialectError> {
        self.type_registry().resolve(ty, length)
    }

    fn supports_identity_columns(&self) -> bool {
        self.capabilities().supports_identity_columns
    }

    fn identity_select_string(&self) -> &str {
        &self.capabilities().identity_select_string
    }

    fn identity_column_string(&self) -> &str {
        &self.capabilities().identity_column_string
    }

    fn has_data_type_in_identity_column(&self) -> bool {
        self.capabilities().has_data_type_in_identity_column
    }

    fn add_column_string(&self) -> &str {
        &self.capabilities().add_column_string
    }

    fn qualify_index_name(&self) -> bool {
        self.capabilities().qualify_index_name
    }

    fn drop_primary_key_constraint_string(&self, constraint_name: &str) -> String {
        self.capabilities()
            .drop_primary_key_string
            .replace("{constraint}", constraint_name)
    }

    fn supports_temporary_tables(&self) -> bool {
        self.capabilities().supports_temporary_tables
    }

    fn temporary_table_name(&self, base_table_name: &str) -> String {
        format!("{}{}", self.capabilities().temporary_table_prefix, base_table_name)
    }

    /// Queries used to read the database schema. Dialects that cannot
    /// introspect report [`DialectError::UnsupportedFeature`].
    fn schema_introspection_queries(&self) -> Result<Vec<String>, DialectError> {
        Err(DialectError::UnsupportedFeature(format!(
            "schema introspection is not available for {}",
            self.name()
        )))
    }

    /// Quote an identifier according to dialect rules
    fn quote_identifier(&self, identifier: &str) -> String {
        let quote = &self.config().sql.quote_identifier;
        let escape = &self.config().sql.escape_identifier;
        let escaped = identifier.replace(quote, escape);
        format!("{}{}{}", quote, escaped, quote)
    }

    fn current_timestamp(&self) -> &str {
        &self.config().sql.current_timestamp
    }

    fn boolean_true(&self) -> &str {
        &self.config().sql.boolean_true
    }

    fn boolean_false(&self) -> &str {
        &self.config().sql.boolean_false
    }
}

/// Error types for dialect operations
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    #[error("No column type registered for {ty}{}", length_suffix(.length))]
    UnmappedType { ty: DbType, length: Option<u32> },

    #[error("Dialect not found: {0}")]
    NotFound(String),

    #[error("Multiple dialects detected: {0:?}")]
    Ambiguous(Vec<String>),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Feature not supported: {0}")]
    UnsupportedFeature(String),
}

fn length_suffix(length: &Option<u32>) -> String {
    length.map(|l| format!(" with length {}", l)).unwrap_or_default()
}
