//! Idempotent schema reconciliation for analytics sinks over ODBC.
//!
//! Given a connection URL and a declarative table descriptor, sinkddl checks
//! what already exists on the target store and issues only the missing DDL:
//! databases, tables, columns. MySQL, Hive and ClickHouse sinks are
//! supported, each behind the same dialect trait. A separate `proxy` module
//! dispatches validated topic-management commands to pluggable cluster
//! services.

pub mod cli;
pub mod engines;
pub mod executor;
pub mod logger;
pub mod model;
pub mod proxy;
pub mod reconciler;
