pub mod builder;

pub use builder::ConnectionStringBuilder;
