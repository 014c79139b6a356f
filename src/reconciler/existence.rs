use log::debug;

use crate::engines::EngineDialect;
use crate::executor::DatabaseExecutor;
use crate::model::descriptor::{safe_identifier, ColumnDescriptor};
use crate::reconciler::ReconcileError;

/// Check whether a database exists on the live store.
pub fn database_exists(
    executor: &mut DatabaseExecutor<'_>,
    engine: &dyn EngineDialect,
    database: &str,
) -> Result<bool, ReconcileError> {
    safe_identifier(database)?;
    let exists = executor.has_rows(&engine.check_database_sql(database))?;
    debug!("check db exist for db={}, result={}", database, exists);
    Ok(exists)
}

/// Check whether a table exists in the given database.
pub fn table_exists(
    executor: &mut DatabaseExecutor<'_>,
    engine: &dyn EngineDialect,
    database: &str,
    table: &str,
) -> Result<bool, ReconcileError> {
    safe_identifier(database)?;
    safe_identifier(table)?;
    let exists = executor.has_rows(&engine.check_table_sql(database, table))?;
    debug!(
        "check table exist for db={} table={}, result={}",
        database, table, exists
    );
    Ok(exists)
}

/// Check whether a column exists in the given table.
///
/// Engines with a column catalog answer with a single probe; the rest fall
/// back to a full describe scan.
pub fn column_exists(
    executor: &mut DatabaseExecutor<'_>,
    engine: &dyn EngineDialect,
    database: &str,
    table: &str,
    column: &str,
) -> Result<bool, ReconcileError> {
    safe_identifier(database)?;
    safe_identifier(table)?;
    safe_identifier(column)?;

    let exists = match engine.check_column_sql(database, table, column) {
        Some(sql) => executor.has_rows(&sql)?,
        None => list_columns(executor, engine, database, table)?
            .iter()
            .any(|c| c.name == column),
    };
    debug!(
        "check column exist for db={} table={} column={}, result={}",
        database, table, column, exists
    );
    Ok(exists)
}

/// Introspect the live columns of a table, in catalog order, with engine
/// bookkeeping rows filtered out.
pub fn list_columns(
    executor: &mut DatabaseExecutor<'_>,
    engine: &dyn EngineDialect,
    database: &str,
    table: &str,
) -> Result<Vec<ColumnDescriptor>, ReconcileError> {
    safe_identifier(database)?;
    safe_identifier(table)?;

    let rows = executor.query_rows(&engine.describe_table_sql(database, table))?;
    let columns: Vec<ColumnDescriptor> = rows
        .iter()
        .filter_map(|row| engine.column_from_describe_row(row))
        .collect();

    debug!(
        "introspected {} columns for db={} table={}",
        columns.len(),
        database,
        table
    );
    Ok(columns)
}

/// List the tables of a database.
pub fn list_table_names(
    executor: &mut DatabaseExecutor<'_>,
    engine: &dyn EngineDialect,
    database: &str,
) -> Result<Vec<String>, ReconcileError> {
    safe_identifier(database)?;

    let rows = executor.query_rows(&engine.list_tables_sql(database))?;
    Ok(rows
        .into_iter()
        .filter_map(|row| row.into_iter().next())
        .filter(|name| !name.is_empty())
        .collect())
}
