use crate::Result;
use crate::param::Query;
use crate::udbc::result::{ExecResult, InsertResult};
use crate::udbc::rows::Rows;
use crate::udbc::statement::Statement;
use async_trait::async_trait;

/// Read-only queries.
#[async_trait]
pub trait Queryer: Send + Sync {
    /// Runs a query and returns its result set. Drivers may report an empty
    /// result as [`DbError::NoRows`](crate::error::DbError::NoRows).
    async fn query(&self, query: &dyn Query) -> Result<Box<dyn Rows>>;
}

/// Row creation.
#[async_trait]
pub trait Inserter: Send + Sync {
    async fn insert(&self, query: &dyn Query) -> Result<Box<dyn InsertResult>>;
}

/// Updates, deletes and anything else that returns no rows.
#[async_trait]
pub trait Execer: Send + Sync {
    async fn exec(&self, query: &dyn Query) -> Result<Box<dyn ExecResult>>;
}

/// Statement preparation.
#[async_trait]
pub trait Preparer: Send + Sync {
    /// Compiles the query's template for repeated execution; its own values,
    /// if any, are ignored.
    async fn prepare(&self, query: &dyn Query) -> Result<Box<dyn Statement>>;
}

/// Everything needed to run queries without caring whether a transaction is
/// in progress.
pub trait QueryExecer: Queryer + Inserter + Execer + Preparer {}

impl<T> QueryExecer for T where T: Queryer + Inserter + Execer + Preparer + ?Sized {}

/// Connection liveness check.
#[async_trait]
pub trait Pinger: Send + Sync {
    async fn ping(&self) -> Result<()>;
}
