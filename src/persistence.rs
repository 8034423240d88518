//! Application-level configuration: pick a preset, collect connection
//! parameters, build immutable settings.

use crate::connection::ConnectionStringBuilder;
use crate::dialects::{DatabaseDialect, DialectError};
use crate::drivers::{DriverAdapter, DriverCatalog, DriverError, ResolvedDriver};
use crate::model::Config;
use crate::presets::{Preset, get_registry};
use log::{debug, info};
use std::sync::Arc;

#[derive(Debug)]
pub struct PersistenceConfiguration {
    preset: Arc<Preset>,
    connection: ConnectionStringBuilder,
}

impl PersistenceConfiguration {
    /// Start from a registered preset name or alias.
    pub fn preset(name: &str) -> Result<Self, DialectError> {
        let preset = get_registry().require(name)?;
        debug!("Selected preset {}", preset.name);
        Ok(Self {
            preset,
            connection: ConnectionStringBuilder::new(),
        })
    }

    pub fn pervasive10() -> Self {
        Self {
            preset: Arc::new(Preset::pervasive10()),
            connection: ConnectionStringBuilder::new(),
        }
    }

    /// Preset, driver overrides and connection parameters from a config file.
    pub fn from_config(config: &Config) -> Result<Self, DialectError> {
        let mut configuration = Self::preset(&config.dialect.preset)?;

        if config.driver.driver_name.is_some() || config.driver.library_path.is_some() {
            let binding = configuration.preset.driver.binding().clone().with_overrides(
                config.driver.driver_name.as_deref(),
                config.driver.library_path.as_deref(),
            );
            let driver = DriverAdapter::new(
                configuration.preset.driver.name(),
                binding,
                configuration.preset.driver.capabilities().clone(),
            );
            configuration.preset = Arc::new(configuration.preset.with_driver(driver));
        }

        configuration.connection = ConnectionStringBuilder::from_config(&config.connection);
        Ok(configuration)
    }

    /// Edit the connection parameters in place.
    pub fn connection_string<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&mut ConnectionStringBuilder),
    {
        configure(&mut self.connection);
        self
    }

    pub fn build(self) -> PersistenceSettings {
        let connection_string = self.connection.render();
        info!(
            "Built persistence settings for preset {} (dialect: {}, driver: {})",
            self.preset.name,
            self.preset.dialect.name(),
            self.preset.driver.name()
        );
        PersistenceSettings {
            preset: self.preset,
            connection_string,
        }
    }

    /// Build and resolve the vendor driver in one step, so that a missing
    /// driver fails here instead of on first connection.
    pub fn build_verified(self, catalog: &dyn DriverCatalog) -> Result<PersistenceSettings, PersistenceError> {
        let settings = self.build();
        let driver = settings.verify_driver(catalog)?;
        debug!("Preset {} resolved driver {}", settings.preset_name(), driver);
        Ok(settings)
    }
}

impl Default for PersistenceConfiguration {
    fn default() -> Self {
        Self::pervasive10()
    }
}

/// Immutable result of a configuration pass; safe to share across threads.
#[derive(Debug, Clone)]
pub struct PersistenceSettings {
    preset: Arc<Preset>,
    connection_string: String,
}

impl PersistenceSettings {
    pub fn preset_name(&self) -> &str {
        &self.preset.name
    }

    pub fn dialect(&self) -> &dyn DatabaseDialect {
        self.preset.dialect.as_ref()
    }

    pub fn driver(&self) -> &DriverAdapter {
        &self.preset.driver
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Resolve the vendor driver now rather than on first connection.
    pub fn verify_driver(&self, catalog: &dyn DriverCatalog) -> Result<&ResolvedDriver, DriverError> {
        self.preset.driver.resolve(catalog)
    }

    /// The string handed to the ODBC driver manager.
    pub fn odbc_connection_string(&self) -> Result<String, DriverError> {
        self.preset.driver.odbc_connection_string(&self.connection_string)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error(transparent)]
    Driver(#[from] DriverError),
}
