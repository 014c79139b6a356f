use log::info;

use crate::engines::EngineDialect;
use crate::executor::{ConnectionManager, DatabaseExecutor};
use crate::model::descriptor::TableDescriptor;
use crate::reconciler::{existence, prepare, ConnectOptions, ReconcileError};

/// Create a table from its descriptor if it does not exist yet. Idempotent:
/// an existing table is logged and skipped.
///
/// With `dry_run` the synthesized statement is printed and nothing is
/// executed; the URL is still validated in full.
pub fn run_create_table(
    url: &str,
    user: &str,
    password: &str,
    table: &TableDescriptor,
    dry_run: bool,
    options: &ConnectOptions,
) -> Result<(), ReconcileError> {
    table.validate_identifiers()?;

    let (engine, connection_string) = prepare(url, user, password)?;
    info!(
        "Reconciling table '{}.{}' on {}",
        table.database,
        table.table,
        engine.name()
    );

    if dry_run {
        info!("DRY RUN: {}", engine.create_table_sql(table));
        return Ok(());
    }

    let connection_manager = ConnectionManager::new()?;
    let connection = connection_manager.connect(&connection_string, options.login_timeout_secs)?;
    ConnectionManager::verify(&connection)?;
    let mut executor = DatabaseExecutor::new(connection);

    if existence::table_exists(&mut executor, engine.as_ref(), &table.database, &table.table)? {
        info!(
            "Table '{}.{}' already exists, nothing to do",
            table.database, table.table
        );
        return Ok(());
    }

    let sql = engine.create_table_sql(table);
    executor.execute_statement(&sql)?;
    info!("Created table '{}.{}'", table.database, table.table);
    Ok(())
}
