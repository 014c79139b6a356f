pub mod connection;

pub use connection::{
    ConnectionError, ConnectionManager, DatabaseExecutor, ExecutionError, QueryError,
};
