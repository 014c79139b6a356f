use log::info;

use crate::engines::EngineDialect;
use crate::executor::{ConnectionManager, DatabaseExecutor};
use crate::model::descriptor::{ColumnDescriptor, TableDescriptor};
use crate::reconciler::{existence, prepare, ConnectOptions, ReconcileError};

/// Append the descriptor's columns that are missing from the live table.
///
/// Every declared column is checked against the live store; only absent ones
/// are added, in declaration order, as one batch. An empty difference
/// executes no DDL. Safe to call repeatedly; concurrent callers racing on
/// the same column fail loudly at the engine without corrupting state.
///
/// Returns the columns that were added.
pub fn run_add_columns(
    url: &str,
    user: &str,
    password: &str,
    table: &TableDescriptor,
    dry_run: bool,
    options: &ConnectOptions,
) -> Result<Vec<ColumnDescriptor>, ReconcileError> {
    table.validate_identifiers()?;

    let (engine, connection_string) = prepare(url, user, password)?;
    info!(
        "Reconciling columns of '{}.{}' on {}",
        table.database,
        table.table,
        engine.name()
    );

    if dry_run {
        // No connection in a dry run; the live difference is computed only
        // at execution time, so every declared column is shown.
        for sql in engine.add_columns_sql(&table.database, &table.table, &table.columns) {
            info!("DRY RUN: {}", sql);
        }
        return Ok(Vec::new());
    }

    let connection_manager = ConnectionManager::new()?;
    let connection = connection_manager.connect(&connection_string, options.login_timeout_secs)?;
    ConnectionManager::verify(&connection)?;
    let mut executor = DatabaseExecutor::new(connection);

    let mut missing: Vec<ColumnDescriptor> = Vec::new();
    for column in &table.columns {
        if existence::column_exists(
            &mut executor,
            engine.as_ref(),
            &table.database,
            &table.table,
            &column.name,
        )? {
            info!("Column '{}' already exists, skipping", column.name);
        } else {
            missing.push(column.clone());
        }
    }

    if missing.is_empty() {
        info!(
            "All {} declared columns already present, nothing to do",
            table.columns.len()
        );
        return Ok(missing);
    }

    let sqls = engine.add_columns_sql(&table.database, &table.table, &missing);
    executor.execute_batch(&sqls, engine.supports_transactions())?;
    info!(
        "Added {} columns to '{}.{}'",
        missing.len(),
        table.database,
        table.table
    );
    Ok(missing)
}
