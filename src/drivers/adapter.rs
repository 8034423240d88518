use crate::drivers::binding::{DriverBinding, DriverCatalog, DriverError, ResolvedDriver};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Parameter and cursor conventions of a driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverCapabilities {
    /// Placeholders carry a name in the SQL text
    pub use_named_prefix_in_sql: bool,

    /// Bound parameter objects carry the prefix in their name
    pub use_named_prefix_in_parameter: bool,

    /// Placeholder prefix, or the whole placeholder for positional drivers
    pub named_prefix: String,

    /// Whether more than one result cursor may be open per connection.
    /// When false, callers must drain and close a cursor before opening
    /// the next one on the same connection.
    pub supports_multiple_open_readers: bool,
}

/// Produces the placeholder text for a query parameter.
pub trait ParameterFormatter {
    fn parameter_name(&self, index: i32) -> String;

    /// `count` placeholders separated by `", "`.
    fn placeholders(&self, count: usize) -> String {
        (0..count)
            .map(|i| self.parameter_name(i32::try_from(i).unwrap_or(i32::MAX)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Binds a driver's parameter conventions to the vendor ODBC driver.
#[derive(Debug)]
pub struct DriverAdapter {
    name: String,
    binding: DriverBinding,
    capabilities: DriverCapabilities,
    resolved: OnceLock<ResolvedDriver>,
}

impl DriverAdapter {
    pub fn new(name: impl Into<String>, binding: DriverBinding, capabilities: DriverCapabilities) -> Self {
        Self {
            name: name.into(),
            binding,
            capabilities,
            resolved: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn binding(&self) -> &DriverBinding {
        &self.binding
    }

    pub fn capabilities(&self) -> &DriverCapabilities {
        &self.capabilities
    }

    pub fn use_named_prefix_in_sql(&self) -> bool {
        self.capabilities.use_named_prefix_in_sql
    }

    pub fn use_named_prefix_in_parameter(&self) -> bool {
        self.capabilities.use_named_prefix_in_parameter
    }

    pub fn named_prefix(&self) -> &str {
        &self.capabilities.named_prefix
    }

    pub fn supports_multiple_open_readers(&self) -> bool {
        self.capabilities.supports_multiple_open_readers
    }

    /// Resolve the binding once; later calls return the cached driver.
    pub fn resolve(&self, catalog: &dyn DriverCatalog) -> Result<&ResolvedDriver, DriverError> {
        if let Some(resolved) = self.resolved.get() {
            return Ok(resolved);
        }

        debug!("Resolving driver for adapter '{}'", self.name);
        let resolved = self.binding.resolve(catalog)?;
        Ok(self.resolved.get_or_init(|| resolved))
    }

    pub fn resolved(&self) -> Option<&ResolvedDriver> {
        self.resolved.get()
    }

    /// Prefix a rendered connection string with the resolved `Driver=`
    /// attribute. Strings that already name a driver or DSN pass through.
    pub fn odbc_connection_string(&self, rendered: &str) -> Result<String, DriverError> {
        if names_driver(rendered) {
            return Ok(rendered.to_string());
        }

        let resolved = self
            .resolved()
            .ok_or_else(|| DriverError::Unresolved(self.name.clone()))?;
        Ok(format!("{};{}", resolved.driver_attribute(), rendered))
    }
}

/// True when a segment key of `rendered` is `Driver` or `DSN`.
fn names_driver(rendered: &str) -> bool {
    rendered
        .split(';')
        .filter_map(|segment| segment.split_once('='))
        .map(|(key, _)| key.trim())
        .any(|key| key.eq_ignore_ascii_case("driver") || key.eq_ignore_ascii_case("dsn"))
}

impl ParameterFormatter for DriverAdapter {
    fn parameter_name(&self, index: i32) -> String {
        if self.capabilities.use_named_prefix_in_sql {
            format!("{}p{}", self.capabilities.named_prefix, index)
        } else {
            self.capabilities.named_prefix.clone()
        }
    }
}
