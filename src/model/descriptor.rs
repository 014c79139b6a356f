use std::fs;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Errors produced while validating connection URLs and descriptor fields.
///
/// All variants are pure parse failures; no network I/O happens before
/// validation succeeds.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("connection URL is invalid, it should start with {expected}")]
    MalformedScheme { expected: String },

    #[error("connection URL has no host:port segment")]
    MalformedAuthority,

    #[error("invalid host:port format in connection URL")]
    MalformedHostPort,

    #[error("invalid port number in connection URL: {0}")]
    InvalidPort(String),

    #[error("host '{host}' is not in the allowed host list for {engine}")]
    HostNotAllowed { host: String, engine: String },

    #[error("identifier '{0}' contains characters outside [A-Za-z0-9_]")]
    UnsafeIdentifier(String),

    #[error("failed to read table descriptor '{0}': {1}")]
    DescriptorRead(String, String),

    #[error("failed to parse table descriptor '{0}': {1}")]
    DescriptorParse(String, String),
}

/// Parsed connection parameters for one target engine.
///
/// Built from a raw `scheme://host:port[/database]` URL at call time and
/// discarded after use; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub database: Option<String>,
}

impl ConnectionDescriptor {
    /// Parse a raw connection URL against the expected scheme prefix.
    ///
    /// Splits the remainder into authority and path, requires the authority
    /// to be exactly `host:port`, and bounds the port to [1, 65535].
    pub fn parse(raw: &str, expected_scheme: &str) -> Result<Self, ValidationError> {
        if !raw.starts_with(expected_scheme) {
            return Err(ValidationError::MalformedScheme {
                expected: expected_scheme.to_string(),
            });
        }

        let remainder = &raw[expected_scheme.len()..];
        let remainder = remainder
            .strip_prefix("://")
            .ok_or(ValidationError::MalformedAuthority)?;

        let (authority, path) = match remainder.split_once('/') {
            Some((authority, path)) => (authority, Some(path)),
            None => (remainder, None),
        };

        if authority.is_empty() {
            return Err(ValidationError::MalformedAuthority);
        }

        let parts: Vec<&str> = authority.split(':').collect();
        if parts.len() != 2 {
            return Err(ValidationError::MalformedHostPort);
        }

        let host = parts[0];
        if host.is_empty() {
            return Err(ValidationError::MalformedHostPort);
        }

        let port: u16 = parts[1]
            .parse()
            .map_err(|_| ValidationError::InvalidPort(parts[1].to_string()))?;
        if port == 0 {
            return Err(ValidationError::InvalidPort(parts[1].to_string()));
        }

        let database = path
            .map(|p| p.split(['?', ';']).next().unwrap_or(p).to_string())
            .filter(|p| !p.is_empty());

        Ok(Self {
            scheme: expected_scheme.to_string(),
            host: host.to_string(),
            port,
            database,
        })
    }
}

static SAFE_IDENTIFIER: OnceLock<Regex> = OnceLock::new();

/// Check an identifier against the safe character set used for all SQL
/// interpolation. DDL cannot be parameterized, so every database, table and
/// column name must pass this before it reaches a statement builder.
pub fn is_safe_identifier(identifier: &str) -> bool {
    let re = SAFE_IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));
    re.is_match(identifier)
}

/// Validate an identifier, returning it on success.
pub fn safe_identifier(identifier: &str) -> Result<&str, ValidationError> {
    if is_safe_identifier(identifier) {
        Ok(identifier)
    } else {
        Err(ValidationError::UnsafeIdentifier(identifier.to_string()))
    }
}

/// A single column of a desired or observed table schema.
///
/// Used both to synthesize `CREATE TABLE` / `ALTER TABLE ADD COLUMN`
/// statements and to carry rows returned from schema introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: String,

    /// Default value expression, interpolated verbatim after DEFAULT.
    #[serde(default)]
    pub default_expr: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,

    /// Compression codec, only meaningful for columnar engines.
    #[serde(default)]
    pub codec: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(name: &str, column_type: &str) -> Self {
        Self {
            name: name.to_string(),
            column_type: column_type.to_string(),
            default_expr: None,
            comment: None,
            codec: None,
        }
    }
}

/// Storage-level options that only some engines understand. Unknown options
/// are ignored by engines that have no use for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageOptions {
    /// Table engine for columnar stores (defaults to MergeTree).
    #[serde(default)]
    pub table_engine: Option<String>,

    /// Sort key columns for columnar stores.
    #[serde(default)]
    pub order_by: Vec<String>,

    #[serde(default)]
    pub partition_by: Option<String>,

    /// Row retention in days; the columnar builder derives a TTL clause and
    /// its bookkeeping column from this.
    #[serde(default)]
    pub ttl_days: Option<u32>,

    /// Field separator for delimited text storage.
    #[serde(default)]
    pub field_delimiter: Option<String>,
}

/// Desired end-state schema of one table, supplied by the caller and
/// immutable once passed in. Column order is preserved exactly when
/// synthesizing DDL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub database: String,
    pub table: String,

    #[serde(default)]
    pub comment: Option<String>,

    pub columns: Vec<ColumnDescriptor>,

    #[serde(default)]
    pub storage: StorageOptions,
}

impl TableDescriptor {
    /// Load a table descriptor from a TOML file.
    pub fn load_from_file(path: &str) -> Result<Self, ValidationError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ValidationError::DescriptorRead(path.to_string(), e.to_string()))?;
        let descriptor: TableDescriptor = toml::from_str(&content)
            .map_err(|e| ValidationError::DescriptorParse(path.to_string(), e.to_string()))?;
        descriptor.validate_identifiers()?;
        Ok(descriptor)
    }

    /// Validate every identifier that would be interpolated into DDL.
    pub fn validate_identifiers(&self) -> Result<(), ValidationError> {
        safe_identifier(&self.database)?;
        safe_identifier(&self.table)?;
        for column in &self.columns {
            safe_identifier(&column.name)?;
        }
        for key in &self.storage.order_by {
            safe_identifier(key)?;
        }
        Ok(())
    }
}

/// Outcome of one reconciliation operation, suitable for serialization at
/// the caller-facing boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnDescriptor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn ok(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            success: true,
            columns,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            columns: Vec::new(),
            error: Some(message.into()),
        }
    }
}
