use crate::error::DbError;
use crate::transaction::{Transaction, TransactionStarter, TxOptions};
use futures::FutureExt;
use futures::future::BoxFuture;
use log::warn;
use std::panic::{self, AssertUnwindSafe};

/// How a [`txn`] block wants its transaction to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome<T> {
    Commit(T),
    Rollback(T),
}

/// Owns an open transaction until it is committed or rolled back. Dropped
/// while still open, it rolls back on a background task.
pub(crate) struct TransactionGuard<T: Transaction + ?Sized + 'static> {
    tx: Option<Box<T>>,
}

impl<T: Transaction + ?Sized + 'static> TransactionGuard<T> {
    pub fn new(tx: Box<T>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn transaction_mut(&mut self) -> Result<&mut T, DbError> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| DbError::TransactionError("transaction already finished".to_string()))
    }

    pub async fn commit(&mut self) -> Result<(), DbError> {
        match self.tx.take() {
            Some(tx) => tx.commit().await,
            None => Err(DbError::TransactionError(
                "transaction already finished".to_string(),
            )),
        }
    }

    pub async fn rollback(&mut self) -> Result<(), DbError> {
        match self.tx.take() {
            Some(tx) => tx.rollback().await,
            None => Ok(()),
        }
    }

    /// Rolls back when the caller already has a failure to report.
    async fn rollback_quietly(&mut self) {
        if let Err(e) = self.rollback().await {
            warn!("Rollback after failed transaction block failed: {}", e);
        }
    }
}

impl<T: Transaction + ?Sized + 'static> Drop for TransactionGuard<T> {
    fn drop(&mut self) {
        let Some(tx) = self.tx.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = tx.rollback().await {
                        warn!("Rollback of abandoned transaction failed: {}", e);
                    }
                });
            }
            Err(_) => warn!("Transaction abandoned outside a tokio runtime; it was not rolled back"),
        }
    }
}

/// Runs `block` inside a transaction started from `starter`.
///
/// The transaction is committed only when the block returns
/// `Ok(TxOutcome::Commit(_))`. It is rolled back exactly once when the block
/// asks for it, returns an error, panics, or is cancelled; the error or panic
/// is passed on after the rollback.
///
/// ```no_run
/// # use vsql::executor::transaction::{txn, TxOutcome};
/// # use vsql::param::Named;
/// # use vsql::transaction::Sql;
/// # use vsql::udbc::connection::Inserter;
/// # use vsql::udbc::result::InsertResult;
/// # async fn demo<D: Sql + ?Sized>(db: &D) -> vsql::Result<()> {
/// let pet_id = txn(db, None, |tx| {
///     Box::pin(async move {
///         let mut q = Named::new("insert into pets (name) values (:name)");
///         q.set("name", "puppy");
///         let result = tx.insert(&q).await?;
///         Ok::<_, vsql::error::DbError>(TxOutcome::Commit(result.last_insert_id()?))
///     })
/// })
/// .await?;
/// # let _ = pet_id;
/// # Ok(())
/// # }
/// ```
pub async fn txn<S, F, T, E>(starter: &S, options: Option<&TxOptions>, block: F) -> Result<T, E>
where
    S: TransactionStarter + ?Sized,
    F: for<'t> FnOnce(&'t mut S::Tx) -> BoxFuture<'t, Result<TxOutcome<T>, E>>,
    E: From<DbError>,
{
    let mut guard = TransactionGuard::new(starter.begin(options).await?);

    let outcome = AssertUnwindSafe(block(guard.transaction_mut()?))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(TxOutcome::Commit(value))) => {
            guard.commit().await?;
            Ok(value)
        }
        Ok(Ok(TxOutcome::Rollback(value))) => {
            guard.rollback().await?;
            Ok(value)
        }
        Ok(Err(e)) => {
            guard.rollback_quietly().await;
            Err(e)
        }
        Err(payload) => {
            guard.rollback_quietly().await;
            panic::resume_unwind(payload)
        }
    }
}
