use crate::dialects::base::{DetectionResult, DialectError};
use crate::drivers::binding::{DriverCatalog, DriverError};
use crate::presets::Preset;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Named presets, each wiring one dialect to one driver adapter.
///
/// Names and aliases are matched case-insensitively.
pub struct PresetRegistry {
    presets: HashMap<String, Arc<Preset>>,
    aliases: HashMap<String, String>, // alias -> preset key
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self {
            presets: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn register(&mut self, preset: Preset) {
        let key = preset.name.to_lowercase();
        debug!("Registering preset: {}", preset.name);

        for alias in &preset.aliases {
            self.aliases.insert(alias.to_lowercase(), key.clone());
        }
        self.presets.insert(key, Arc::new(preset));
    }

    /// Get a preset by name or alias
    pub fn get(&self, name: &str) -> Option<Arc<Preset>> {
        let key = name.to_lowercase();
        if let Some(preset) = self.presets.get(&key) {
            return Some(preset.clone());
        }

        self.aliases
            .get(&key)
            .and_then(|preset_key| self.presets.get(preset_key))
            .cloned()
    }

    /// Like [`get`](Self::get) but reports unknown names as an error.
    pub fn require(&self, name: &str) -> Result<Arc<Preset>, DialectError> {
        self.get(name).ok_or_else(|| {
            DialectError::NotFound(format!(
                "no preset named '{}' (available: {})",
                name,
                self.list_presets().join(", ")
            ))
        })
    }

    /// Pick the preset whose dialect best matches a connection string.
    pub fn detect(&self, connection_string: &str) -> Result<Arc<Preset>, DialectError> {
        let mut candidates: Vec<(Arc<Preset>, DetectionResult)> = self
            .presets
            .values()
            .filter_map(|preset| {
                preset
                    .dialect
                    .detect(connection_string)
                    .map(|result| (preset.clone(), result))
            })
            .collect();

        if candidates.is_empty() {
            warn!("No preset detected for connection string");
            return Err(DialectError::NotFound("No matching preset found".to_string()));
        }

        candidates.sort_by(|a, b| {
            b.1.confidence
                .partial_cmp(&a.1.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if candidates.len() > 1
            && (candidates[0].1.confidence - candidates[1].1.confidence).abs() < 0.1
            && candidates[0].1.dialect_name != candidates[1].1.dialect_name
        {
            let names = candidates.iter().map(|(p, _)| p.name.clone()).collect();
            return Err(DialectError::Ambiguous(names));
        }

        let (preset, result) = &candidates[0];
        debug!(
            "Detected preset {} via pattern '{}' (confidence: {})",
            preset.name, result.matched_pattern, result.confidence
        );
        Ok(preset.clone())
    }

    /// Registered preset names, sorted
    pub fn list_presets(&self) -> Vec<String> {
        let mut names: Vec<String> = self.presets.values().map(|p| p.name.clone()).collect();
        names.sort();
        names
    }

    /// Resolve every preset's driver binding up front so that a missing
    /// vendor driver surfaces at startup.
    pub fn validate_drivers(&self, catalog: &dyn DriverCatalog) -> Vec<(String, Result<String, DriverError>)> {
        let mut results: Vec<_> = self
            .presets
            .values()
            .map(|preset| {
                let outcome = preset.driver.resolve(catalog).map(|d| d.to_string());
                (preset.name.clone(), outcome)
            })
            .collect();
        results.sort_by(|a, b| a.0.cmp(&b.0));
        results
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: OnceLock<PresetRegistry> = OnceLock::new();

/// The process-wide registry of built-in presets. Immutable once built.
pub fn get_registry() -> &'static PresetRegistry {
    GLOBAL_REGISTRY.get_or_init(create_default_registry)
}

fn create_default_registry() -> PresetRegistry {
    let mut registry = PresetRegistry::new();
    registry.register(Preset::pervasive10());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_builtin_preset_by_name_and_alias() {
        let registry = get_registry();

        for name in ["Pervasive10", "pervasive10", "pervasive", "PSQL", "actian-psql"] {
            let preset = registry.get(name).unwrap_or_else(|| panic!("missing {}", name));
            assert_eq!(preset.name, "Pervasive10");
        }
        assert!(registry.get("postgres").is_none());
    }

    #[test]
    fn require_lists_available_presets() {
        let err = get_registry().require("oracle").unwrap_err();
        assert!(err.to_string().contains("Pervasive10"));
    }

    #[test]
    fn detects_from_connection_string() {
        let registry = get_registry();

        let preset = registry
            .detect("Server Name=db01;Database Name=DEMODATA;User ID=;Password=")
            .unwrap();
        assert_eq!(preset.name, "Pervasive10");
        assert!(registry.detect("Host=localhost;Port=5432").is_err());
    }

    #[test]
    fn lists_presets() {
        assert_eq!(get_registry().list_presets(), vec!["Pervasive10".to_string()]);
    }
}
