//! Target-engine dialect system.
//!
//! Each supported engine carries its configuration in an embedded TOML file
//! and implements the EngineDialect trait for URL validation, DDL synthesis
//! and schema introspection statements.

pub mod base;
pub mod registry;

// Engine modules
pub mod clickhouse;
pub mod hive;
pub mod mysql;

// Re-export main types
pub use base::{EngineDialect, EngineError};
pub use registry::get_registry;

use std::sync::Arc;

/// Get engine by name
pub fn get_engine(name: &str) -> Option<Arc<dyn EngineDialect>> {
    let registry = get_registry().lock().unwrap();
    registry.get(name)
}

/// Detect the engine for a connection URL by its prefix.
pub fn detect_engine(url: &str) -> Result<Arc<dyn EngineDialect>, EngineError> {
    let registry = get_registry().lock().unwrap();
    registry.detect(url)
}

/// List all available engine names
pub fn list_engines() -> Vec<String> {
    let registry = get_registry().lock().unwrap();
    registry.list_engines()
}
