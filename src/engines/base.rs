use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::descriptor::{
    ColumnDescriptor, ConnectionDescriptor, TableDescriptor, ValidationError,
};

/// Configuration metadata for a target engine, loaded from the engine's
/// embedded dialect.toml.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialectConfig {
    pub metadata: DialectMetadata,
    pub detection: DetectionConfig,
    pub odbc: OdbcConfig,
    pub features: FeatureConfig,
    pub sql: SqlConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub introspection: IntrospectionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialectMetadata {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetectionConfig {
    /// Expected connection URL prefix, e.g. "jdbc:mysql".
    pub url_prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OdbcConfig {
    /// Installed ODBC driver name used to build DSN-less connection strings.
    pub driver: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureConfig {
    /// Batches run inside an explicit transaction when true; engines without
    /// transactional DDL run batches sequentially and are partial-failure
    /// prone on mid-batch errors.
    pub supports_transactions: bool,

    /// True when one ALTER TABLE statement can add several columns at once.
    pub grouped_add_columns: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqlConfig {
    pub quote_identifier: String,
    pub escape_identifier: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SecurityConfig {
    /// Anchored regex of hosts this engine may be reached on. Absent means
    /// unrestricted.
    pub allowed_hosts: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IntrospectionConfig {
    /// Bookkeeping column managed by this tool (row retention); appended to
    /// generated tables when a TTL is requested and excluded from reported
    /// introspection results.
    pub retention_column: Option<String>,
}

/// Escape a string literal for interpolation between single quotes.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Escape a value for a braced ODBC connection-string attribute.
pub fn escape_odbc_value(value: &str) -> String {
    value.replace('}', "}}")
}

/// Base trait implemented by every target engine.
///
/// DDL synthesis methods are pure: same descriptor in, same SQL out. All
/// identifiers reaching them must already have passed the safe-identifier
/// check in `model::descriptor`.
pub trait EngineDialect: Send + Sync + std::fmt::Debug {
    /// Get the engine configuration
    fn config(&self) -> &DialectConfig;

    /// Get the engine name
    fn name(&self) -> &str {
        &self.config().metadata.name
    }

    /// Get engine aliases
    fn aliases(&self) -> &[String] {
        &self.config().metadata.aliases
    }

    /// Expected connection URL prefix
    fn url_prefix(&self) -> &str {
        &self.config().detection.url_prefix
    }

    /// Compiled host allow-list, when the engine restricts deployment targets.
    fn allowed_hosts(&self) -> Option<&Regex> {
        None
    }

    /// Parse and validate a raw connection URL for this engine.
    ///
    /// Pure parsing plus the allow-list check; no network I/O. A host outside
    /// the allow-list fails here, before any connection attempt.
    fn validate_url(&self, raw: &str) -> Result<ConnectionDescriptor, ValidationError> {
        let descriptor = ConnectionDescriptor::parse(raw, self.url_prefix())?;
        if let Some(pattern) = self.allowed_hosts() {
            if !pattern.is_match(&descriptor.host) {
                return Err(ValidationError::HostNotAllowed {
                    host: descriptor.host,
                    engine: self.name().to_string(),
                });
            }
        }
        Ok(descriptor)
    }

    /// Build a DSN-less ODBC connection string for the validated descriptor.
    fn odbc_connection_string(
        &self,
        descriptor: &ConnectionDescriptor,
        user: &str,
        password: &str,
    ) -> String {
        let mut attributes = vec![
            format!("Driver={{{}}}", self.config().odbc.driver),
            format!("Server={}", descriptor.host),
            format!("Port={}", descriptor.port),
        ];
        if let Some(database) = &descriptor.database {
            attributes.push(format!("Database={}", database));
        }
        attributes.push(format!("Uid={}", user));
        attributes.push(format!("Pwd={{{}}}", escape_odbc_value(password)));
        attributes.join(";")
    }

    /// Quote an identifier according to dialect rules
    fn quote_identifier(&self, identifier: &str) -> String {
        let quote = &self.config().sql.quote_identifier;
        let escape = &self.config().sql.escape_identifier;
        let escaped = identifier.replace(quote, escape);
        format!("{}{}{}", quote, escaped, quote)
    }

    /// Quote a database-qualified table name
    fn quote_qualified(&self, database: &str, table: &str) -> String {
        format!(
            "{}.{}",
            self.quote_identifier(database),
            self.quote_identifier(table)
        )
    }

    /// Generate SQL creating a database when absent
    fn create_db_sql(&self, database: &str) -> String;

    /// Generate SQL creating a table from the descriptor; column order
    /// follows the descriptor's column sequence exactly
    fn create_table_sql(&self, table: &TableDescriptor) -> String;

    /// Generate the schema introspection statement for a table
    fn describe_table_sql(&self, database: &str, table: &str) -> String;

    /// Generate the statements appending the given columns, in order
    fn add_columns_sql(
        &self,
        database: &str,
        table: &str,
        columns: &[ColumnDescriptor],
    ) -> Vec<String>;

    /// Generate the existence probe for a database; any returned row means
    /// the database exists
    fn check_database_sql(&self, database: &str) -> String;

    /// Generate the existence probe for a table
    fn check_table_sql(&self, database: &str, table: &str) -> String;

    /// Generate the existence probe for a column. None means the engine has
    /// no column catalog and callers fall back to a describe scan.
    fn check_column_sql(&self, database: &str, table: &str, column: &str) -> Option<String>;

    /// Generate the statement listing a database's tables
    fn list_tables_sql(&self, database: &str) -> String;

    /// Map one introspection result row to a column descriptor.
    ///
    /// Returns None for rows that are not columns (section markers, blank
    /// separators) or for the tool-managed retention column.
    fn column_from_describe_row(&self, row: &[String]) -> Option<ColumnDescriptor> {
        let name = row.first()?.trim();
        if name.is_empty() || name.starts_with('#') {
            return None;
        }
        let column_type = row.get(1).map(|s| s.trim().to_string()).unwrap_or_default();
        let comment = row
            .get(2)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && *s != "NULL")
            .map(String::from);
        Some(ColumnDescriptor {
            name: name.to_string(),
            column_type,
            default_expr: None,
            comment,
            codec: None,
        })
    }

    fn supports_transactions(&self) -> bool {
        self.config().features.supports_transactions
    }
}

/// Error types for engine lookup
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Engine not found: {0}")]
    NotFound(String),

    #[error("No engine matches connection URL prefix: {0}")]
    UnknownUrlPrefix(String),
}
