use log::{debug, error, info, warn};
use odbc_api::{
    buffers::TextRowSet, Connection, ConnectionOptions, Cursor, Environment, Error as OdbcError,
};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("ODBC error: {0}")]
    Odbc(#[from] OdbcError),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection is unusable: {0}")]
    Unusable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("ODBC error: {0}")]
    Odbc(#[from] OdbcError),

    #[error("Query failed [{sql}]: {message}")]
    QueryFailed { sql: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Statement failed [{sql}]: {message}")]
    StatementFailed { sql: String, message: String },

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

/// Owns the ODBC environment. Safe to construct repeatedly; connections
/// borrow it and close on drop, on every exit path.
pub struct ConnectionManager {
    environment: Arc<Environment>,
}

impl ConnectionManager {
    pub fn new() -> Result<Self, ConnectionError> {
        let environment = Environment::new()?;
        Ok(Self {
            environment: Arc::new(environment),
        })
    }

    /// Open a connection with a bounded login wait. The connection string
    /// carries credentials and must never reach the log.
    pub fn connect(
        &self,
        connection_string: &str,
        login_timeout_secs: u32,
    ) -> Result<Connection<'_>, ConnectionError> {
        debug!(
            "Connecting to database with connection string length: {}",
            connection_string.len()
        );

        let options = ConnectionOptions {
            login_timeout_sec: Some(login_timeout_secs),
            ..ConnectionOptions::default()
        };

        let connection = self
            .environment
            .connect_with_connection_string(connection_string, options)
            .map_err(|e| {
                error!("Failed to connect to database: {}", e);
                ConnectionError::ConnectionFailed(e.to_string())
            })?;

        info!("Successfully connected to database");
        Ok(connection)
    }

    /// Probe a fresh connection with a trivial query. Guards against drivers
    /// that hand back a handle unable to serve statements.
    pub fn verify(connection: &Connection<'_>) -> Result<(), ConnectionError> {
        let probe = "SELECT 1";
        let mut prepared = connection
            .prepare(probe)
            .map_err(|e| ConnectionError::Unusable(e.to_string()))?;

        let cursor = prepared
            .execute(())
            .map_err(|e| ConnectionError::Unusable(e.to_string()))?;

        if let Some(mut cursor) = cursor {
            let mut buffer = TextRowSet::for_cursor(1, &mut cursor, Some(4096))
                .map_err(|e| ConnectionError::Unusable(e.to_string()))?;
            let mut row_set_cursor = cursor
                .bind_buffer(&mut buffer)
                .map_err(|e| ConnectionError::Unusable(e.to_string()))?;
            row_set_cursor
                .fetch()
                .map_err(|e| ConnectionError::Unusable(e.to_string()))?;
        }

        debug!("Connection probe succeeded");
        Ok(())
    }
}

pub struct DatabaseExecutor<'a> {
    connection: Connection<'a>,
}

impl<'a> DatabaseExecutor<'a> {
    pub fn new(connection: Connection<'a>) -> Self {
        Self { connection }
    }

    /// Execute a single statement, consuming any result rows.
    pub fn execute_statement(&mut self, sql: &str) -> Result<(), ExecutionError> {
        debug!("Executing SQL statement: {}", sql);

        let mut prepared = self.connection.prepare(sql).map_err(|e| {
            ExecutionError::StatementFailed {
                sql: sql.to_string(),
                message: e.to_string(),
            }
        })?;

        let result = match prepared.execute(()) {
            Ok(Some(mut cursor)) => {
                let mut buffer = TextRowSet::for_cursor(100, &mut cursor, Some(4096)).map_err(
                    |e| ExecutionError::StatementFailed {
                        sql: sql.to_string(),
                        message: e.to_string(),
                    },
                )?;
                let mut row_set_cursor =
                    cursor
                        .bind_buffer(&mut buffer)
                        .map_err(|e| ExecutionError::StatementFailed {
                            sql: sql.to_string(),
                            message: e.to_string(),
                        })?;
                while row_set_cursor
                    .fetch()
                    .map_err(|e| ExecutionError::StatementFailed {
                        sql: sql.to_string(),
                        message: e.to_string(),
                    })?
                    .is_some()
                {
                    // Consume results
                }
                debug!("Statement executed successfully with results");
                Ok(())
            }
            Ok(None) => {
                debug!("Statement executed successfully (no results)");
                Ok(())
            }
            Err(e) => {
                error!("Statement execution failed: {}", e);
                Err(ExecutionError::StatementFailed {
                    sql: sql.to_string(),
                    message: e.to_string(),
                })
            }
        };
        result
    }

    /// Execute a batch of statements.
    ///
    /// With `transactional` the batch runs with auto-commit off and commits
    /// only after every statement succeeded; auto-commit is restored no
    /// matter how the batch ends. Without it, statements run sequentially
    /// and a mid-batch failure leaves earlier statements applied.
    pub fn execute_batch(
        &mut self,
        sqls: &[String],
        transactional: bool,
    ) -> Result<(), ExecutionError> {
        if sqls.is_empty() {
            debug!("Empty batch, nothing to execute");
            return Ok(());
        }

        if !transactional {
            for sql in sqls {
                self.execute_statement(sql)?;
            }
            return Ok(());
        }

        self.connection
            .set_autocommit(false)
            .map_err(|e| ExecutionError::TransactionFailed(e.to_string()))?;

        let outcome = match self.run_batch(sqls) {
            Ok(()) => self
                .connection
                .commit()
                .map_err(|e| ExecutionError::TransactionFailed(e.to_string())),
            Err(e) => {
                if let Err(rollback_err) = self.connection.rollback() {
                    warn!("Rollback after failed batch also failed: {}", rollback_err);
                }
                Err(e)
            }
        };

        if let Err(restore_err) = self.connection.set_autocommit(true) {
            warn!("Failed to restore auto-commit: {}", restore_err);
        }

        match &outcome {
            Ok(()) => info!("Batch of {} statements committed", sqls.len()),
            Err(e) => error!("Batch failed: {}", e),
        }
        outcome
    }

    fn run_batch(&mut self, sqls: &[String]) -> Result<(), ExecutionError> {
        for sql in sqls {
            self.execute_statement(sql)?;
        }
        Ok(())
    }

    /// Run an introspection query and collect every row as text cells.
    pub fn query_rows(&mut self, query: &str) -> Result<Vec<Vec<String>>, QueryError> {
        debug!("Querying rows: {}", query);

        let mut prepared = self
            .connection
            .prepare(query)
            .map_err(|e| QueryError::QueryFailed {
                sql: query.to_string(),
                message: e.to_string(),
            })?;

        let cursor = prepared.execute(()).map_err(|e| QueryError::QueryFailed {
            sql: query.to_string(),
            message: e.to_string(),
        })?;

        let Some(mut cursor) = cursor else {
            debug!("Query produced no cursor");
            return Ok(Vec::new());
        };

        let mut buffer = TextRowSet::for_cursor(100, &mut cursor, Some(4096))?;
        let mut row_set_cursor = cursor.bind_buffer(&mut buffer)?;
        let mut results = Vec::new();

        while let Some(row_set) = row_set_cursor.fetch()? {
            for row_index in 0..row_set.num_rows() {
                let mut row = Vec::new();
                for col_index in 0..row_set.num_cols() {
                    let value = row_set
                        .at(col_index, row_index)
                        .map(|v| String::from_utf8_lossy(v).to_string())
                        .unwrap_or_default();
                    row.push(value);
                }
                results.push(row);
            }
        }

        debug!("Query returned {} rows", results.len());
        Ok(results)
    }

    /// Existence probe: any returned row means true. Absence of rows is the
    /// normal false result, never an error.
    pub fn has_rows(&mut self, query: &str) -> Result<bool, QueryError> {
        Ok(!self.query_rows(query)?.is_empty())
    }
}
