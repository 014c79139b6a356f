use crate::engines::base::{
    escape_odbc_value, escape_sql_string, DialectConfig, EngineDialect,
};
use crate::model::descriptor::{ColumnDescriptor, ConnectionDescriptor, TableDescriptor};
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();

/// Field separator used when a descriptor does not name one; matches the
/// default delimiter of text-stored warehouse tables.
const DEFAULT_FIELD_DELIMITER: &str = "\\001";

#[derive(Debug)]
pub struct HiveEngine {
    config: &'static DialectConfig,
}

impl HiveEngine {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            let config_str = include_str!("dialect.toml");
            toml::from_str(config_str).expect("Failed to parse Hive dialect config")
        });

        Self { config }
    }

    fn render_column(&self, column: &ColumnDescriptor) -> String {
        let mut rendered = format!(
            "{} {}",
            self.quote_identifier(&column.name),
            column.column_type
        );
        if let Some(comment) = &column.comment {
            rendered.push_str(&format!(" COMMENT '{}'", escape_sql_string(comment)));
        }
        rendered
    }
}

impl Default for HiveEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineDialect for HiveEngine {
    fn config(&self) -> &DialectConfig {
        self.config
    }

    // Hive ODBC drivers take Host/Schema rather than Server/Database.
    fn odbc_connection_string(
        &self,
        descriptor: &ConnectionDescriptor,
        user: &str,
        password: &str,
    ) -> String {
        let mut attributes = vec![
            format!("Driver={{{}}}", self.config().odbc.driver),
            format!("Host={}", descriptor.host),
            format!("Port={}", descriptor.port),
        ];
        if let Some(database) = &descriptor.database {
            attributes.push(format!("Schema={}", database));
        }
        attributes.push(format!("UID={}", user));
        attributes.push(format!("PWD={{{}}}", escape_odbc_value(password)));
        attributes.join(";")
    }

    fn create_db_sql(&self, database: &str) -> String {
        format!(
            "CREATE DATABASE IF NOT EXISTS {}",
            self.quote_identifier(database)
        )
    }

    fn create_table_sql(&self, table: &TableDescriptor) -> String {
        let columns: Vec<String> = table
            .columns
            .iter()
            .map(|column| self.render_column(column))
            .collect();

        let mut sql = format!(
            "CREATE TABLE {} ({})",
            self.quote_qualified(&table.database, &table.table),
            columns.join(", ")
        );
        if let Some(comment) = &table.comment {
            sql.push_str(&format!(" COMMENT '{}'", escape_sql_string(comment)));
        }
        if let Some(partition_by) = &table.storage.partition_by {
            sql.push_str(&format!(" PARTITIONED BY ({})", partition_by));
        }
        let delimiter = table
            .storage
            .field_delimiter
            .as_deref()
            .unwrap_or(DEFAULT_FIELD_DELIMITER);
        sql.push_str(&format!(
            " ROW FORMAT DELIMITED FIELDS TERMINATED BY '{}' STORED AS TEXTFILE",
            delimiter
        ));
        sql
    }

    fn describe_table_sql(&self, database: &str, table: &str) -> String {
        format!("DESCRIBE {}", self.quote_qualified(database, table))
    }

    // One grouped ADD COLUMNS statement; the warehouse applies it atomically.
    fn add_columns_sql(
        &self,
        database: &str,
        table: &str,
        columns: &[ColumnDescriptor],
    ) -> Vec<String> {
        if columns.is_empty() {
            return Vec::new();
        }
        let rendered: Vec<String> = columns
            .iter()
            .map(|column| self.render_column(column))
            .collect();
        vec![format!(
            "ALTER TABLE {} ADD COLUMNS ({})",
            self.quote_qualified(database, table),
            rendered.join(", ")
        )]
    }

    fn check_database_sql(&self, database: &str) -> String {
        format!("SHOW DATABASES LIKE '{}'", database)
    }

    fn check_table_sql(&self, database: &str, table: &str) -> String {
        format!(
            "SHOW TABLES IN {} LIKE '{}'",
            self.quote_identifier(database),
            table
        )
    }

    // DESCRIBE scan fallback; there is no SQL-addressable column catalog.
    fn check_column_sql(&self, _database: &str, _table: &str, _column: &str) -> Option<String> {
        None
    }

    fn list_tables_sql(&self, database: &str) -> String {
        format!("SHOW TABLES IN {}", self.quote_identifier(database))
    }
}
