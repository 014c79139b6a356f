use crate::engines::base::{EngineDialect, EngineError};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Central registry for all supported target engines
pub struct EngineRegistry {
    engines: HashMap<String, Arc<dyn EngineDialect>>,
    aliases: HashMap<String, String>, // alias -> engine_name mapping
}

impl EngineRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            engines: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register an engine in the registry
    pub fn register(&mut self, engine: Arc<dyn EngineDialect>) {
        let name = engine.name().to_string();
        debug!("Registering engine: {}", name);

        for alias in engine.aliases() {
            self.aliases.insert(alias.clone(), name.clone());
        }

        self.engines.insert(name, engine);
    }

    /// Get an engine by name (including aliases)
    pub fn get(&self, name: &str) -> Option<Arc<dyn EngineDialect>> {
        if let Some(engine) = self.engines.get(name) {
            return Some(engine.clone());
        }

        if let Some(engine_name) = self.aliases.get(name) {
            return self.engines.get(engine_name).cloned();
        }

        None
    }

    /// Detect the engine from a connection URL prefix.
    ///
    /// Prefixes are distinct per engine, so the first match wins.
    pub fn detect(&self, url: &str) -> Result<Arc<dyn EngineDialect>, EngineError> {
        for engine in self.engines.values() {
            if url.starts_with(engine.url_prefix()) {
                debug!("Engine '{}' matched URL prefix", engine.name());
                return Ok(engine.clone());
            }
        }

        let prefix = url.split("://").next().unwrap_or(url);
        Err(EngineError::UnknownUrlPrefix(prefix.to_string()))
    }

    /// List all registered engine names
    pub fn list_engines(&self) -> Vec<String> {
        let mut names: Vec<String> = self.engines.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::{Mutex, OnceLock};

/// Global registry instance
static GLOBAL_REGISTRY: OnceLock<Mutex<EngineRegistry>> = OnceLock::new();

/// Get the global engine registry (initialized lazily)
pub fn get_registry() -> &'static Mutex<EngineRegistry> {
    GLOBAL_REGISTRY.get_or_init(|| Mutex::new(create_default_registry()))
}

/// Create registry with all built-in engines
fn create_default_registry() -> EngineRegistry {
    let mut registry = EngineRegistry::new();

    registry.register(Arc::new(crate::engines::mysql::MysqlEngine::new()));
    registry.register(Arc::new(crate::engines::hive::HiveEngine::new()));
    registry.register(Arc::new(crate::engines::clickhouse::ClickhouseEngine::new()));

    registry
}
