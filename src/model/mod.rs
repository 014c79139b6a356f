pub mod config;
pub mod descriptor;

pub use config::{Config, ConfigError};
pub use descriptor::{
    ColumnDescriptor, ConnectionDescriptor, ExecutionResult, StorageOptions, TableDescriptor,
    ValidationError,
};
