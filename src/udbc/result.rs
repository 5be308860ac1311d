use crate::Result;
use crate::error::DbError;

/// Outcome of an `exec` call.
pub trait ExecResult: Send + Sync {
    /// Rows created or modified. Not all databases support this.
    fn rows_affected(&self) -> Result<u64>;
}

/// Outcome of an `insert` call.
pub trait InsertResult: ExecResult {
    /// ID of the row most recently created. Not all databases support this.
    fn last_insert_id(&self) -> Result<u64>;
}

/// Plain [`ExecResult`]/[`InsertResult`] for drivers that know both numbers
/// up front. A `None` reports as unsupported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub rows_affected: Option<u64>,
    pub last_insert_id: Option<u64>,
}

impl QueryResult {
    pub fn new(rows_affected: u64) -> Self {
        Self {
            rows_affected: Some(rows_affected),
            last_insert_id: None,
        }
    }

    pub fn inserted(rows_affected: u64, last_insert_id: u64) -> Self {
        Self {
            rows_affected: Some(rows_affected),
            last_insert_id: Some(last_insert_id),
        }
    }
}

impl ExecResult for QueryResult {
    fn rows_affected(&self) -> Result<u64> {
        self.rows_affected
            .ok_or_else(|| DbError::Unsupported("rows affected".to_string()))
    }
}

impl InsertResult for QueryResult {
    fn last_insert_id(&self) -> Result<u64> {
        self.last_insert_id
            .ok_or_else(|| DbError::Unsupported("last insert id".to_string()))
    }
}
