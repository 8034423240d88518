//! Pervasive SQL (Actian PSQL) dialect and ODBC driver adapter.
//!
//! The crate pairs a data-driven SQL dialect with a driver adapter under a
//! named preset, renders Pervasive connection strings, and resolves the
//! vendor ODBC driver through the system driver manager.

pub mod cli;
pub mod connection;
pub mod dialects;
pub mod drivers;
pub mod executor;
pub mod logger;
pub mod model;
pub mod persistence;
pub mod presets;

pub use connection::ConnectionStringBuilder;
pub use dialects::{DatabaseDialect, DbType, DialectError};
pub use drivers::{DriverAdapter, DriverCatalog, DriverError};
pub use persistence::{PersistenceConfiguration, PersistenceSettings};
pub use presets::{Preset, get_registry};
