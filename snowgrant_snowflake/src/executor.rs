//! The seam between grant logic and the warehouse.
//!
//! Everything that talks to Snowflake goes through an [`Executor`]. The
//! REST client implements it for real connections; tests implement it
//! in memory.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

/// A single result row, keyed by column name. Snowflake returns `null`
/// cells as `None`.
pub type Row = HashMap<String, Option<String>>;

/// Runs literal SQL statements against the warehouse.
///
/// Statements are never parameterized. Implementations run one statement
/// per call and only return once it has completed.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute a statement, dropping any result.
    async fn execute(&self, sql: &str) -> Result<()>;

    /// Run a query and return its rows.
    async fn query(&self, sql: &str) -> Result<Vec<Row>>;
}
