use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL, scheme://host:port[/database].
    pub url: Option<String>,

    pub username: Option<String>,

    /// Bound on connection acquisition; unreachable hosts fail instead of
    /// hanging on driver defaults.
    #[serde(default = "default_login_timeout")]
    pub login_timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_colored")]
    pub colored: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Print synthesized DDL instead of executing it.
    #[serde(default)]
    pub default_dry_run: bool,
}

fn default_login_timeout() -> u32 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_colored() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            login_timeout_secs: default_login_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            colored: default_colored(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            default_dry_run: false,
        }
    }
}

impl Config {
    /// Load configuration from file with environment override support
    pub fn load(config_path: Option<&str>, environment: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Load base configuration file
        if let Some(path) = config_path {
            config = Self::load_from_file(path)?;
        } else {
            for standard_path in Self::standard_config_paths() {
                if standard_path.exists() {
                    debug!("Loading config from: {}", standard_path.display());
                    config = Self::load_from_file(standard_path.to_str().unwrap())?;
                    break;
                }
            }
        }

        // Load environment-specific overrides
        if let Some(env) = environment {
            if let Ok(env_config) = Self::load_environment_config(env) {
                debug!("Applying environment config for: {}", env);
                config = config.merge(env_config);
            }
        }

        // Load local overrides (always last)
        if let Ok(local_config) = Self::load_from_file("config/local.toml") {
            debug!("Applying local config overrides");
            config = config.merge(local_config);
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_string(), e.to_string()))
    }

    fn load_environment_config(environment: &str) -> Result<Self, ConfigError> {
        let env_path = format!("config/{}.toml", environment);
        Self::load_from_file(&env_path)
    }

    fn standard_config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("config.toml"),
            PathBuf::from("config/default.toml"),
        ]
    }

    /// Merge this config with another, with the other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        if other.database.url.is_some() {
            self.database.url = other.database.url;
        }
        if other.database.username.is_some() {
            self.database.username = other.database.username;
        }
        self.database.login_timeout_secs = other.database.login_timeout_secs;

        self.logging.level = other.logging.level;
        self.logging.colored = other.logging.colored;

        self.behavior.default_dry_run = other.behavior.default_dry_run;

        self
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_config_default_values() {
        let config = Config::default();

        assert_eq!(config.database.url, None);
        assert_eq!(config.database.username, None);
        assert_eq!(config.database.login_timeout_secs, 30);

        assert_eq!(config.logging.level, "info");
        assert!(config.logging.colored);

        assert!(!config.behavior.default_dry_run);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();

        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[logging]"));
        assert!(toml_str.contains("[behavior]"));

        assert!(toml_str.contains("login_timeout_secs = 30"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
[database]
url = "jdbc:clickhouse://localhost:8123/metrics"
username = "loader"
login_timeout_secs = 10

[logging]
level = "debug"
colored = false

[behavior]
default_dry_run = true
        "#;

        let config: Config = toml::from_str(toml_content).unwrap();

        assert_eq!(
            config.database.url.as_deref(),
            Some("jdbc:clickhouse://localhost:8123/metrics")
        );
        assert_eq!(config.database.username.as_deref(), Some("loader"));
        assert_eq!(config.database.login_timeout_secs, 10);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.colored);
        assert!(config.behavior.default_dry_run);
    }

    #[test]
    fn test_config_partial_deserialization() {
        let toml_content = r#"
[database]
login_timeout_secs = 5
        "#;

        let config: Config = toml::from_str(toml_content).unwrap();

        assert_eq!(config.database.login_timeout_secs, 5);

        // Unspecified values fall back to defaults
        assert_eq!(config.database.url, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_load_from_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[database]
url = "jdbc:mysql://db:3306/sales"
login_timeout_secs = 120
        "#;

        fs::write(temp_file.path(), config_content).unwrap();

        let config = Config::load_from_file(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.database.login_timeout_secs, 120);
        assert_eq!(
            config.database.url.as_deref(),
            Some("jdbc:mysql://db:3306/sales")
        );
    }

    #[test]
    fn test_config_load_from_nonexistent_file() {
        let result = Config::load_from_file("/nonexistent/config.toml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::FileRead(_, _)));
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_file = NamedTempFile::new().unwrap();
        let invalid_content = "invalid toml content [[[";

        fs::write(temp_file.path(), invalid_content).unwrap();

        let result = Config::load_from_file(temp_file.path().to_str().unwrap());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_, _)));
    }

    #[test]
    fn test_config_merge() {
        let base_config = Config {
            database: DatabaseConfig {
                url: Some("jdbc:mysql://base:3306/a".to_string()),
                username: Some("base".to_string()),
                login_timeout_secs: 30,
            },
            ..Config::default()
        };

        let override_config = Config {
            database: DatabaseConfig {
                url: Some("jdbc:mysql://override:3306/b".to_string()),
                username: None,
                login_timeout_secs: 60,
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                colored: false,
            },
            ..Config::default()
        };

        let merged = base_config.merge(override_config);

        assert_eq!(
            merged.database.url,
            Some("jdbc:mysql://override:3306/b".to_string())
        );
        // None username does not clobber the existing one
        assert_eq!(merged.database.username, Some("base".to_string()));
        assert_eq!(merged.database.login_timeout_secs, 60);
        assert_eq!(merged.logging.level, "debug");
    }

    #[test]
    fn test_generate_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("generated-config.toml");

        Config::generate_default_config(config_path.to_str().unwrap()).unwrap();

        assert!(config_path.exists());

        let loaded_config = Config::load_from_file(config_path.to_str().unwrap()).unwrap();
        let default_config = Config::default();

        assert_eq!(
            loaded_config.database.login_timeout_secs,
            default_config.database.login_timeout_secs
        );
        assert_eq!(loaded_config.logging.level, default_config.logging.level);
    }

    #[test]
    fn test_config_error_display() {
        let errors = vec![
            ConfigError::FileRead("test.toml".to_string(), "Not found".to_string()),
            ConfigError::Parse("test.toml".to_string(), "Invalid syntax".to_string()),
            ConfigError::FileWrite("test.toml".to_string(), "Permission denied".to_string()),
            ConfigError::Serialize("Invalid value".to_string()),
        ];

        for error in errors {
            let error_string = format!("{}", error);
            assert!(!error_string.is_empty());
            match error {
                ConfigError::FileRead(path, _) => assert!(error_string.contains(&path)),
                ConfigError::Parse(path, _) => assert!(error_string.contains(&path)),
                ConfigError::FileWrite(path, _) => assert!(error_string.contains(&path)),
                ConfigError::Serialize(_) => assert!(error_string.contains("serialize")),
            }
        }
    }
}
