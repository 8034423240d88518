//! Named presets pairing a dialect with a driver adapter.

pub mod registry;

pub use registry::{PresetRegistry, get_registry};

use crate::dialects::{DatabaseDialect, pervasive};
use crate::drivers::{self, DriverAdapter};
use std::fmt;
use std::sync::Arc;

/// One dialect wired to one driver adapter under a public name.
pub struct Preset {
    pub name: String,
    pub aliases: Vec<String>,
    pub dialect: Arc<dyn DatabaseDialect>,
    pub driver: Arc<DriverAdapter>,
}

impl Preset {
    pub fn new(name: impl Into<String>, dialect: Arc<dyn DatabaseDialect>, driver: DriverAdapter) -> Self {
        let mut aliases: Vec<String> = dialect.aliases().to_vec();
        aliases.push(dialect.name().to_string());

        Self {
            name: name.into(),
            aliases,
            dialect,
            driver: Arc::new(driver),
        }
    }

    /// Pervasive PSQL v10 and later through the PSQL ODBC client.
    pub fn pervasive10() -> Self {
        Self::new(
            "Pervasive10",
            pervasive::dialect(),
            drivers::pervasive::adapter(drivers::pervasive::binding()),
        )
    }

    /// Same dialect with a different driver adapter, e.g. after applying
    /// configured driver overrides.
    pub fn with_driver(&self, driver: DriverAdapter) -> Self {
        Self {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            dialect: self.dialect.clone(),
            driver: Arc::new(driver),
        }
    }
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preset")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("dialect", &self.dialect.name())
            .field("driver", &self.driver.name())
            .finish()
    }
}
