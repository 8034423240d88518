pub mod config;

pub use config::{Config, ConfigError, ConnectionConfig, DialectSettings, DriverSettings, LoggingConfig};
