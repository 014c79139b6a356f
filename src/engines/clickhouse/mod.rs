use crate::engines::base::{escape_sql_string, DialectConfig, EngineDialect};
use crate::model::descriptor::{ColumnDescriptor, TableDescriptor};
use regex::Regex;
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();
static ALLOWED_HOSTS: OnceLock<Regex> = OnceLock::new();

const DEFAULT_TABLE_ENGINE: &str = "MergeTree";

#[derive(Debug)]
pub struct ClickhouseEngine {
    config: &'static DialectConfig,
    allowed_hosts: &'static Regex,
}

impl ClickhouseEngine {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            let config_str = include_str!("dialect.toml");
            toml::from_str(config_str).expect("Failed to parse ClickHouse dialect config")
        });

        let allowed_hosts = ALLOWED_HOSTS.get_or_init(|| {
            let pattern = config
                .security
                .allowed_hosts
                .as_deref()
                .expect("ClickHouse dialect config must carry an allowed_hosts pattern");
            Regex::new(pattern).expect("Failed to compile ClickHouse allowed_hosts pattern")
        });

        Self {
            config,
            allowed_hosts,
        }
    }

    /// Name of the tool-managed retention column.
    pub fn retention_column(&self) -> &str {
        self.config
            .introspection
            .retention_column
            .as_deref()
            .unwrap_or("ttl_date_time")
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
        if let Some(codec) = &column.codec {
            rendered.push_str(&format!(" CODEC({})", codec));
        }
        rendered
    }
}

impl Default for ClickhouseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineDialect for ClickhouseEngine {
    fn config(&self) -> &DialectConfig {
        self.config
    }

    fn allowed_hosts(&self) -> Option<&Regex> {
        Some(self.allowed_hosts)
    }

    fn create_db_sql(&self, database: &str) -> String {
        format!(
            "CREATE DATABASE IF NOT EXISTS {}",
            self.quote_identifier(database)
        )
    }

    fn create_table_sql(&self, table: &TableDescriptor) -> String {
        let mut columns: Vec<String> = table
            .columns
            .iter()
            .map(|column| self.render_column(column))
            .collect();

        // A requested TTL needs a time column to age against; append the
        // managed retention column rather than requiring it in descriptors.
        if table.storage.ttl_days.is_some() {
            columns.push(format!(
                "{} DateTime DEFAULT now()",
                self.quote_identifier(self.retention_column())
            ));
        }

        let table_engine = table
            .storage
            .table_engine
            .as_deref()
            .unwrap_or(DEFAULT_TABLE_ENGINE);

        let mut sql = format!(
            "CREATE TABLE {} ({}) ENGINE = {}",
            self.quote_qualified(&table.database, &table.table),
            columns.join(", "),
            table_engine
        );

        if let Some(partition_by) = &table.storage.partition_by {
            sql.push_str(&format!(" PARTITION BY {}", partition_by));
        }

        let order_by = if table.storage.order_by.is_empty() {
            "tuple()".to_string()
        } else {
            let keys: Vec<String> = table
                .storage
                .order_by
                .iter()
                .map(|key| self.quote_identifier(key))
                .collect();
            format!("({})", keys.join(", "))
        };
        sql.push_str(&format!(" ORDER BY {}", order_by));

        if let Some(ttl_days) = table.storage.ttl_days {
            sql.push_str(&format!(
                " TTL {} + INTERVAL {} DAY",
                self.quote_identifier(self.retention_column()),
                ttl_days
            ));
        }

        if let Some(comment) = &table.comment {
            sql.push_str(&format!(" COMMENT '{}'", escape_sql_string(comment)));
        }

        sql
    }

    fn describe_table_sql(&self, database: &str, table: &str) -> String {
        format!("DESCRIBE TABLE {}", self.quote_qualified(database, table))
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
            "SELECT name FROM system.databases WHERE name = '{}'",
            database
        )
    }

    fn check_table_sql(&self, database: &str, table: &str) -> String {
        format!(
            "SELECT name FROM system.tables WHERE database = '{}' AND name = '{}'",
            database, table
        )
    }

    fn check_column_sql(&self, database: &str, table: &str, column: &str) -> Option<String> {
        Some(format!(
            "SELECT name FROM system.columns \
             WHERE database = '{}' AND table = '{}' AND name = '{}'",
            database, table, column
        ))
    }

    fn list_tables_sql(&self, database: &str) -> String {
        format!(
            "SELECT name FROM system.tables WHERE database = '{}'",
            database
        )
    }

    // DESCRIBE TABLE yields name, type, default_type, default_expression,
    // comment, codec_expression, ttl_expression.
    fn column_from_describe_row(&self, row: &[String]) -> Option<ColumnDescriptor> {
        let name = row.first()?.trim();
        if name.is_empty() || name == self.retention_column() {
            return None;
        }

        let column_type = row.get(1).map(|s| s.trim().to_string()).unwrap_or_default();

        let default_kind = row.get(2).map(|s| s.trim()).unwrap_or("");
        let default_expr = row
            .get(3)
            .map(|s| s.trim())
            .filter(|expr| !default_kind.is_empty() && !expr.is_empty())
            .map(String::from);

        let comment = row
            .get(4)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from);

        let codec = row
            .get(5)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.strip_prefix("CODEC(")
                    .and_then(|inner| inner.strip_suffix(')'))
                    .unwrap_or(s)
                    .to_string()
            });

        Some(ColumnDescriptor {
            name: name.to_string(),
            column_type,
            default_expr,
            comment,
            codec,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::descriptor::{StorageOptions, ValidationError};

    fn sample_table(ttl_days: Option<u32>) -> TableDescriptor {
        TableDescriptor {
            database: "metrics".into(),
            table: "points".into(),
            comment: None,
            columns: vec![
                ColumnDescriptor::new("ts", "DateTime"),
                ColumnDescriptor {
                    name: "value".into(),
                    column_type: "Float64".into(),
                    default_expr: Some("0".into()),
                    comment: None,
                    codec: Some("ZSTD".into()),
                },
            ],
            storage: StorageOptions {
                order_by: vec!["ts".into()],
                ttl_days,
                ..StorageOptions::default()
            },
        }
    }

    #[test]
    fn allow_list_permits_local_segments() {
        let engine = ClickhouseEngine::new();
        for url in [
            "jdbc:clickhouse://localhost:8123/m",
            "jdbc:clickhouse://192.168.1.42:8123/m",
            "jdbc:clickhouse://10.0.0.7:8123/m",
        ] {
            assert!(engine.validate_url(url).is_ok(), "expected {} to pass", url);
        }
    }

    #[test]
    fn allow_list_rejects_public_host_before_connecting() {
        let engine = ClickhouseEngine::new();
        let err = engine
            .validate_url("jdbc:clickhouse://203.0.113.9:8123/x")
            .unwrap_err();
        assert!(matches!(err, ValidationError::HostNotAllowed { .. }));
    }

    #[test]
    fn create_table_without_ttl_has_no_retention_column() {
        let engine = ClickhouseEngine::new();
        let sql = engine.create_table_sql(&sample_table(None));
        assert_eq!(
            sql,
            "CREATE TABLE `metrics`.`points` \
             (`ts` DateTime, `value` Float64 DEFAULT 0 CODEC(ZSTD)) \
             ENGINE = MergeTree ORDER BY (`ts`)"
        );
    }

    #[test]
    fn create_table_with_ttl_appends_retention_column() {
        let engine = ClickhouseEngine::new();
        let sql = engine.create_table_sql(&sample_table(Some(7)));
        assert!(sql.contains("`ttl_date_time` DateTime DEFAULT now()"));
        assert!(sql.ends_with("TTL `ttl_date_time` + INTERVAL 7 DAY"));
    }

    #[test]
    fn empty_order_by_falls_back_to_tuple() {
        let engine = ClickhouseEngine::new();
        let mut table = sample_table(None);
        table.storage.order_by.clear();
        let sql = engine.create_table_sql(&table);
        assert!(sql.ends_with("ORDER BY tuple()"));
    }

    #[test]
    fn describe_rows_hide_retention_column() {
        let engine = ClickhouseEngine::new();

        let row: Vec<String> = vec![
            "value".into(),
            "Float64".into(),
            "DEFAULT".into(),
            "0".into(),
            "gauge value".into(),
            "CODEC(ZSTD)".into(),
            "".into(),
        ];
        let column = engine.column_from_describe_row(&row).unwrap();
        assert_eq!(column.column_type, "Float64");
        assert_eq!(column.default_expr.as_deref(), Some("0"));
        assert_eq!(column.comment.as_deref(), Some("gauge value"));
        assert_eq!(column.codec.as_deref(), Some("ZSTD"));

        let hidden: Vec<String> = vec![
            "ttl_date_time".into(),
            "DateTime".into(),
            "DEFAULT".into(),
            "now()".into(),
            "".into(),
            "".into(),
            "".into(),
        ];
        assert!(engine.column_from_describe_row(&hidden).is_none());
    }

    #[test]
    fn existence_probes_target_system_tables() {
        let engine = ClickhouseEngine::new();
        assert!(engine.check_database_sql("metrics").contains("system.databases"));
        assert!(engine.check_table_sql("metrics", "points").contains("system.tables"));
        assert!(engine
            .check_column_sql("metrics", "points", "ts")
            .unwrap()
            .contains("system.columns"));
    }
}
