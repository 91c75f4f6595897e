//! SQL execution probe
//!
//! The database itself is reached through the small [`DatabaseClient`] /
//! [`DbConnection`] / [`DbCursor`] capability set so the timing logic does
//! not depend on a particular driver. [`postgres::PostgresClient`] is the
//! driver used by the command line tool.

pub mod descriptor;
pub mod file;
pub mod hard_parse;
pub mod measure;
pub mod postgres;
pub mod probe;

pub use descriptor::ConnectionDescriptor;
pub use file::{parse_sql_file, split_statements};
pub use hard_parse::{Clock, HardParse, SystemClock};
pub use measure::{measure_queries, run_one_sql_execution, QueryMeasurement};
pub use postgres::PostgresClient;
pub use probe::{ConnectionMode, SqlProbe, SqlSettings};

use crate::error::Result;
use async_trait::async_trait;

/// Opens connections to a database
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    async fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<Box<dyn DbConnection>>;
}

/// An open database session; closed when dropped
#[async_trait]
pub trait DbConnection: Send {
    async fn cursor(&self) -> Result<Box<dyn DbCursor>>;
}

/// Executes statements and fetches their rows
#[async_trait]
pub trait DbCursor: Send {
    /// Start executing `sql`, discarding any unfetched rows of the previous statement
    async fn execute(&mut self, sql: &str) -> Result<()>;

    /// Fetch every remaining row, returning how many were fetched
    async fn fetch_all(&mut self) -> Result<u64>;

    /// Fetch up to `batch_size` rows; zero means the result set is exhausted
    async fn fetch_many(&mut self, batch_size: u32) -> Result<u64>;
}
