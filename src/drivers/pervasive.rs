use crate::drivers::adapter::{DriverAdapter, DriverCapabilities};
use crate::drivers::binding::DriverBinding;
use std::path::PathBuf;

/// Binding for the Pervasive PSQL ODBC client.
pub fn binding() -> DriverBinding {
    DriverBinding {
        vendor: "Actian PSQL".to_string(),
        driver_names: vec![
            "Pervasive ODBC Interface".to_string(),
            "Pervasive ODBC Client Interface".to_string(),
            "Pervasive ODBC Engine Interface".to_string(),
        ],
        library_path: Some(PathBuf::from("/usr/local/psql/lib64/libodbcci.so")),
        search_paths: vec![
            PathBuf::from("/usr/local/psql"),
            PathBuf::from("/usr/local/actianzen"),
            PathBuf::from("/opt/psql"),
        ],
        installation_info: Some(
            "Install the PSQL client and register its ODBC driver with the driver manager".to_string(),
        ),
    }
}

/// Positional `?` parameters, one open cursor per connection.
pub fn capabilities() -> DriverCapabilities {
    DriverCapabilities {
        use_named_prefix_in_sql: false,
        use_named_prefix_in_parameter: false,
        named_prefix: "?".to_string(),
        supports_multiple_open_readers: false,
    }
}

pub fn adapter(binding: DriverBinding) -> DriverAdapter {
    DriverAdapter::new("pervasive-odbc", binding, capabilities())
}
