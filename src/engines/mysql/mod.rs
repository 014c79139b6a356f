use crate::engines::base::{escape_sql_string, DialectConfig, EngineDialect};
use crate::model::descriptor::{ColumnDescriptor, TableDescriptor};
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();

#[derive(Debug)]
pub struct MysqlEngine {
    config: &'static DialectConfig,
}

impl MysqlEngine {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            let config_str = include_str!("dialect.toml");
            toml::from_str(config_str).expect("Failed to parse MySQL dialect config")
        });

        Self { config }
    }

    fn render_column(&self, column: &ColumnDescriptor) -> String {
        let mut rendered = format!(
            "{} {}",
            self.quote_identifier(&column.name),
            column.column_type
        );
        if let Some(default_expr) = &column.default_expr {
            rendered.push_str(&format!(" DEFAULT {}", default_expr));
        }
        if let Some(comment) = &column.comment {
            rendered.push_str(&format!(" COMMENT '{}'", escape_sql_string(comment)));
        }
        rendered
    }
}

impl Default for MysqlEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineDialect for MysqlEngine {
    fn config(&self) -> &DialectConfig {
        self.config
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
            sql.push_str(&format!(" COMMENT='{}'", escape_sql_string(comment)));
        }
        sql
    }

    fn describe_table_sql(&self, database: &str, table: &str) -> String {
        format!(
            "SELECT COLUMN_NAME, COLUMN_TYPE, COLUMN_COMMENT \
             FROM information_schema.COLUMNS \
             WHERE TABLE_SCHEMA = '{}' AND TABLE_NAME = '{}' \
             ORDER BY ORDINAL_POSITION",
            database, table
        )
    }

    fn add_columns_sql(
        &self,
        database: &str,
        table: &str,
        columns: &[ColumnDescriptor],
    ) -> Vec<String> {
        columns
            .iter()
            .map(|column| {
                format!(
                    "ALTER TABLE {} ADD COLUMN {}",
                    self.quote_qualified(database, table),
                    self.render_column(column)
                )
            })
            .collect()
    }

    fn check_database_sql(&self, database: &str) -> String {
        format!(
            "SELECT SCHEMA_NAME FROM information_schema.SCHEMATA WHERE SCHEMA_NAME = '{}'",
            database
        )
    }

    fn check_table_sql(&self, database: &str, table: &str) -> String {
        format!(
            "SELECT TABLE_NAME FROM information_schema.TABLES \
             WHERE TABLE_SCHEMA = '{}' AND TABLE_NAME = '{}'",
            database, table
        )
    }

    fn check_column_sql(&self, database: &str, table: &str, column: &str) -> Option<String> {
        Some(format!(
            "SELECT COLUMN_NAME FROM information_schema.COLUMNS \
             WHERE TABLE_SCHEMA = '{}' AND TABLE_NAME = '{}' AND COLUMN_NAME = '{}'",
            database, table, column
        ))
    }

    fn list_tables_sql(&self, database: &str) -> String {
        format!(
            "SELECT TABLE_NAME FROM information_schema.TABLES WHERE TABLE_SCHEMA = '{}'",
            database
        )
    }
}
