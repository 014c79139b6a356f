use log::info;

use crate::executor::{ConnectionManager, DatabaseExecutor};
use crate::model::descriptor::ColumnDescriptor;
use crate::reconciler::{existence, prepare, ConnectOptions, ReconcileError};

/// Introspect the live columns of a table.
pub fn run_describe(
    url: &str,
    user: &str,
    password: &str,
    database: &str,
    table: &str,
    options: &ConnectOptions,
) -> Result<Vec<ColumnDescriptor>, ReconcileError> {
    let (engine, connection_string) = prepare(url, user, password)?;

    let connection_manager = ConnectionManager::new()?;
    let connection = connection_manager.connect(&connection_string, options.login_timeout_secs)?;
    ConnectionManager::verify(&connection)?;
    let mut executor = DatabaseExecutor::new(connection);

    let columns = existence::list_columns(&mut executor, engine.as_ref(), database, table)?;
    info!(
        "Table '{}.{}' has {} columns",
        database,
        table,
        columns.len()
    );
    Ok(columns)
}

/// List the tables of a database.
pub fn run_list_tables(
    url: &str,
    user: &str,
    password: &str,
    database: &str,
    options: &ConnectOptions,
) -> Result<Vec<String>, ReconcileError> {
    let (engine, connection_string) = prepare(url, user, password)?;

    let connection_manager = ConnectionManager::new()?;
    let connection = connection_manager.connect(&connection_string, options.login_timeout_secs)?;
    ConnectionManager::verify(&connection)?;
    let mut executor = DatabaseExecutor::new(connection);

    let tables = existence::list_table_names(&mut executor, engine.as_ref(), database)?;
    info!("Database '{}' has {} tables", database, tables.len());
    Ok(tables)
}
