use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Source of installed ODBC driver names, normally the driver manager.
pub trait DriverCatalog {
    fn installed_drivers(&self) -> Result<Vec<String>, DriverError>;
}

/// Names the vendor ODBC driver a dialect talks to.
///
/// Construction only records names; nothing is looked up until
/// [`DriverBinding::resolve`] runs against a [`DriverCatalog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverBinding {
    /// Vendor shown in diagnostics
    pub vendor: String,

    /// Driver names registered with the driver manager, most preferred first
    pub driver_names: Vec<String>,

    /// Driver library to load directly when no registered name matches
    pub library_path: Option<PathBuf>,

    /// Directories searched for the library's file name
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,

    /// Installation instructions shown when resolution fails
    pub installation_info: Option<String>,
}

/// How a binding was satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverSource {
    /// Registered with the driver manager under this name
    Registered(String),
    /// Loaded from a library file
    Library(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDriver {
    pub vendor: String,
    pub source: DriverSource,
}

impl ResolvedDriver {
    /// The `Driver=` attribute selecting this driver.
    pub fn driver_attribute(&self) -> String {
        match &self.source {
            DriverSource::Registered(name) => format!("Driver={{{}}}", name),
            DriverSource::Library(path) => format!("Driver={{{}}}", path.display()),
        }
    }
}

impl fmt::Display for ResolvedDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            DriverSource::Registered(name) => write!(f, "{} ({})", name, self.vendor),
            DriverSource::Library(path) => write!(f, "{} ({})", path.display(), self.vendor),
        }
    }
}

impl DriverBinding {
    /// Replace the preferred driver name and library with configured values.
    pub fn with_overrides(mut self, driver_name: Option<&str>, library_path: Option<&Path>) -> Self {
        if let Some(name) = driver_name {
            self.driver_names.retain(|n| n != name);
            self.driver_names.insert(0, name.to_string());
        }
        if let Some(path) = library_path {
            self.library_path = Some(path.to_path_buf());
        }
        self
    }

    pub fn resolve(&self, catalog: &dyn DriverCatalog) -> Result<ResolvedDriver, DriverError> {
        let installed = catalog.installed_drivers()?;
        debug!(
            "Resolving {} driver against {} installed drivers",
            self.vendor,
            installed.len()
        );

        for wanted in &self.driver_names {
            if let Some(found) = installed.iter().find(|name| name.eq_ignore_ascii_case(wanted)) {
                info!("Using registered ODBC driver: {}", found);
                return Ok(ResolvedDriver {
                    vendor: self.vendor.clone(),
                    source: DriverSource::Registered(found.clone()),
                });
            }
        }

        if let Some(path) = self.find_library() {
            info!("Using ODBC driver library: {}", path.display());
            return Ok(ResolvedDriver {
                vendor: self.vendor.clone(),
                source: DriverSource::Library(path),
            });
        }

        Err(DriverError::Resolution {
            vendor: self.vendor.clone(),
            guidance: self.guidance(),
        })
    }

    fn find_library(&self) -> Option<PathBuf> {
        let library = self.library_path.as_ref()?;
        if library.exists() {
            return Some(library.clone());
        }

        let filename = library.file_name()?;
        for search_path in &self.search_paths {
            let candidate = search_path.join(filename);
            if candidate.exists() {
                return Some(candidate);
            }

            for subdir in ["lib", "lib64"] {
                let subdir_candidate = search_path.join(subdir).join(filename);
                if subdir_candidate.exists() {
                    return Some(subdir_candidate);
                }
            }
        }

        None
    }

    fn guidance(&self) -> String {
        let mut guidance = format!(
            "none of the registered drivers [{}] is installed",
            self.driver_names.join(", ")
        );
        if let Some(path) = &self.library_path {
            guidance.push_str(&format!(" and {} was not found", path.display()));
        }
        if let Some(install_info) = &self.installation_info {
            guidance.push_str(&format!(". {}", install_info));
        }
        guidance
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Cannot resolve {vendor} ODBC driver: {guidance}")]
    Resolution { vendor: String, guidance: String },

    #[error("ODBC driver manager error: {0}")]
    Odbc(#[from] odbc_api::Error),

    #[error("Driver {0} has not been resolved yet")]
    Unresolved(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct Installed(Vec<&'static str>);

    impl DriverCatalog for Installed {
        fn installed_drivers(&self) -> Result<Vec<String>, DriverError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    fn binding() -> DriverBinding {
        DriverBinding {
            vendor: "Acme".to_string(),
            driver_names: vec!["Acme ODBC".to_string(), "Acme Legacy ODBC".to_string()],
            library_path: Some(PathBuf::from("/nonexistent/libacme.so")),
            search_paths: vec![],
            installation_info: Some("Install the Acme client.".to_string()),
        }
    }

    #[test]
    fn prefers_first_listed_name() {
        let catalog = Installed(vec!["SQLite3", "Acme Legacy ODBC", "acme odbc"]);
        let resolved = binding().resolve(&catalog).unwrap();

        assert_eq!(resolved.source, DriverSource::Registered("acme odbc".to_string()));
        assert_eq!(resolved.driver_attribute(), "Driver={acme odbc}");
    }

    #[test]
    fn falls_back_to_library_in_search_path() {
        let dir = tempdir().unwrap();
        let lib_dir = dir.path().join("lib64");
        std::fs::create_dir(&lib_dir).unwrap();
        std::fs::write(lib_dir.join("libacme.so"), b"").unwrap();

        let mut binding = binding();
        binding.search_paths = vec![dir.path().to_path_buf()];

        let resolved = binding.resolve(&Installed(vec![])).unwrap();
        assert_eq!(resolved.source, DriverSource::Library(lib_dir.join("libacme.so")));
    }

    #[test]
    fn missing_driver_is_a_resolution_error() {
        let err = binding().resolve(&Installed(vec!["SQLite3"])).unwrap_err();
        let message = err.to_string();

        assert!(matches!(err, DriverError::Resolution { .. }));
        assert!(message.contains("Acme ODBC"));
        assert!(message.contains("Install the Acme client."));
    }

    #[test]
    fn overrides_put_configured_name_first() {
        let binding = binding().with_overrides(Some("Acme Legacy ODBC"), Some(Path::new("/opt/acme.so")));

        assert_eq!(binding.driver_names, vec!["Acme Legacy ODBC", "Acme ODBC"]);
        assert_eq!(binding.library_path, Some(PathBuf::from("/opt/acme.so")));
    }
}
