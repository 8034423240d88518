//! SQL dialect descriptions.
//!
//! A dialect is a data table (column types, capabilities, SQL literals,
//! detection patterns) loaded into a [`TableDialect`]. Consumers talk to it
//! through the [`DatabaseDialect`] trait.

pub mod base;
pub mod pervasive;
pub mod table;
pub mod types;

pub use base::{
    Capabilities, CapabilityValue, DatabaseDialect, DetectionResult, DialectConfig, DialectError,
};
pub use table::TableDialect;
pub use types::{DbType, TypeMapping, TypeRegistry};
