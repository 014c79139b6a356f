use log::info;

use crate::engines::EngineDialect;
use crate::executor::{ConnectionManager, DatabaseExecutor};
use crate::model::descriptor::safe_identifier;
use crate::reconciler::{existence, prepare, ConnectOptions, ReconcileError};

/// Create a database if it does not exist yet. Idempotent: a database that
/// is already present is logged and skipped, not an error.
pub fn run_create_db(
    url: &str,
    user: &str,
    password: &str,
    database: &str,
    options: &ConnectOptions,
) -> Result<(), ReconcileError> {
    safe_identifier(database)?;

    let (engine, connection_string) = prepare(url, user, password)?;
    info!("Reconciling database '{}' on {}", database, engine.name());

    let connection_manager = ConnectionManager::new()?;
    let connection = connection_manager.connect(&connection_string, options.login_timeout_secs)?;
    ConnectionManager::verify(&connection)?;
    let mut executor = DatabaseExecutor::new(connection);

    if existence::database_exists(&mut executor, engine.as_ref(), database)? {
        info!("Database '{}' already exists, nothing to do", database);
        return Ok(());
    }

    let sql = engine.create_db_sql(database);
    executor.execute_statement(&sql)?;
    info!("Created database '{}'", database);
    Ok(())
}
