//! Driver adapters binding dialect parameter conventions to vendor ODBC drivers.

pub mod adapter;
pub mod binding;
pub mod pervasive;

pub use adapter::{DriverAdapter, DriverCapabilities, ParameterFormatter};
pub use binding::{DriverBinding, DriverCatalog, DriverError, DriverSource, ResolvedDriver};
