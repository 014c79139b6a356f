//! Schema reconciliation operations.
//!
//! Every operation follows the same control flow: validate the connection
//! URL, open a scoped connection, check what already exists, synthesize DDL
//! for what is missing, execute it. Each call owns its connection for the
//! duration and releases it before returning, on every exit path.

pub mod add_columns;
pub mod create_db;
pub mod create_table;
pub mod describe;
pub mod existence;

pub use add_columns::run_add_columns;
pub use create_db::run_create_db;
pub use create_table::run_create_table;
pub use describe::{run_describe, run_list_tables};

use std::sync::Arc;

use crate::engines::{self, EngineDialect, EngineError};
use crate::executor::{ConnectionError, ExecutionError, QueryError};
use crate::model::descriptor::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

/// Per-call connection knobs, sourced from configuration.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub login_timeout_secs: u32,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            login_timeout_secs: 30,
        }
    }
}

/// Resolve the engine for a URL and build the ODBC connection string.
///
/// Pure validation; nothing here touches the network. A URL that fails the
/// scheme, host:port or allow-list checks never reaches a driver.
pub(crate) fn prepare(
    url: &str,
    user: &str,
    password: &str,
) -> Result<(Arc<dyn EngineDialect>, String), ReconcileError> {
    let engine = engines::detect_engine(url)?;
    let descriptor = engine.validate_url(url)?;
    let connection_string = engine.odbc_connection_string(&descriptor, user, password);
    Ok((engine, connection_string))
}
