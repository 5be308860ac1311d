use crate::Result;
use crate::param::Parameterer;
use crate::udbc::result::{ExecResult, InsertResult};
use crate::udbc::rows::Rows;
use async_trait::async_trait;

/// A prepared statement. Each call binds a fresh set of values against the
/// template the statement was prepared from.
#[async_trait]
pub trait Statement: Send + Sync {
    async fn query(&self, params: &dyn Parameterer) -> Result<Box<dyn Rows>>;

    async fn insert(&self, params: &dyn Parameterer) -> Result<Box<dyn InsertResult>>;

    async fn exec(&self, params: &dyn Parameterer) -> Result<Box<dyn ExecResult>>;

    async fn close(&self) -> Result<()>;
}
