use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use toml::{Table, Value};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default)]
    pub dialect: DialectSettings,

    #[serde(default)]
    pub driver: DriverSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub server: Option<String>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,

    /// Used verbatim when set and non-blank
    pub connection_string: Option<String>,

    /// Login timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u32,

    /// Extra `key=value` segments appended to the rendered string
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialectSettings {
    #[serde(default = "default_preset")]
    pub preset: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DriverSettings {
    /// Registered ODBC driver name tried before the built-in candidates
    pub driver_name: Option<String>,

    /// Driver library loaded directly when no registered name matches
    pub library_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "plain" or "timestamped"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default values
fn default_timeout() -> u32 {
    30
}
fn default_preset() -> String {
    "Pervasive10".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "plain".to_string()
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            server: None,
            database: None,
            username: None,
            password: None,
            connection_string: None,
            timeout: default_timeout(),
            fields: BTreeMap::new(),
        }
    }
}

impl Default for DialectSettings {
    fn default() -> Self {
        Self {
            preset: default_preset(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment override support.
    ///
    /// Files are layered as raw TOML tables before deserializing, so a later
    /// file only overrides the keys it actually sets.
    pub fn load(config_path: Option<&str>, environment: Option<&str>) -> Result<Self, ConfigError> {
        let mut merged = Table::new();

        if let Some(path) = config_path {
            merged = Self::read_table(path)?;
        } else {
            for standard_path in Self::standard_config_paths() {
                if standard_path.exists() {
                    debug!("Loading config from: {}", standard_path.display());
                    merged = Self::read_table(&standard_path.to_string_lossy())?;
                    break;
                }
            }
        }

        if let Some(env) = environment {
            if let Ok(env_table) = Self::read_table(&format!("config/{}.toml", env)) {
                debug!("Applying environment config for: {}", env);
                merge_tables(&mut merged, env_table);
            }
        }

        // Local overrides always apply last
        if let Ok(local_table) = Self::read_table("config/local.toml") {
            debug!("Applying local config overrides");
            merge_tables(&mut merged, local_table);
        }

        Value::Table(merged).try_into().map_err(|e: toml::de::Error| {
            ConfigError::Parse("merged configuration".to_string(), e.to_string())
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_string(), e.to_string()))
    }

    fn read_table(path: &str) -> Result<Table, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_string(), e.to_string()))
    }

    /// Standard configuration file paths in order of precedence
    fn standard_config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("config.toml"),
            PathBuf::from("config/default.toml"),
        ]
    }

    /// Generate a default configuration file
    pub fn generate_default_config(path: &str) -> Result<(), ConfigError> {
        let config = Config::default();
        let toml_content =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, toml_content)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;

        Ok(())
    }
}

/// Overlay `overlay` onto `base`: nested tables merge key by key, every
/// other value replaces what `base` had.
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        if let Value::Table(incoming) = value {
            if let Some(Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config file '{0}': {1}")]
    Parse(String, String),

    #[error("Failed to write config file '{0}': {1}")]
    FileWrite(String, String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}
