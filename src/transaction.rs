use crate::Result;
use crate::udbc::connection::{Pinger, QueryExecer};
use async_trait::async_trait;

/// Transaction isolation levels, as understood by most engines. Drivers map
/// the ones they support and reject the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IsolationLevel {
    /// Whatever the driver or server is configured to use.
    #[default]
    Default,
    ReadUncommitted,
    ReadCommitted,
    WriteCommitted,
    RepeatableRead,
    Snapshot,
    Serializable,
    Linearizable,
}

/// Options for starting a transaction.
///
/// ```
/// use vsql::transaction::{IsolationLevel, TxOptions};
///
/// let opts = TxOptions::new()
///     .isolation_level(IsolationLevel::Serializable)
///     .read_only(true);
/// assert!(opts.is_read_only());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxOptions {
    isolation_level: IsolationLevel,
    read_only: bool,
}

impl TxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn isolation_level(mut self, level: IsolationLevel) -> Self {
        self.isolation_level = level;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn level(&self) -> IsolationLevel {
        self.isolation_level
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}

/// An open transaction. Queries run through it see its uncommitted changes.
#[async_trait]
pub trait Transaction: QueryExecer {
    /// Persists the changes made within the transaction.
    async fn commit(&self) -> Result<()>;

    /// Discards the changes made within the transaction.
    async fn rollback(&self) -> Result<()>;
}

/// Something transactions can be started from.
#[async_trait]
pub trait TransactionStarter: Send + Sync {
    /// The kind of transaction handed out; `dyn Transaction` for flat
    /// transactions, `dyn NestedTransaction` where nesting is supported.
    type Tx: Transaction + ?Sized + 'static;

    /// Starts a transaction. `None` uses the driver's defaults.
    async fn begin(&self, options: Option<&TxOptions>) -> Result<Box<Self::Tx>>;
}

/// A transaction able to start transactions of its own (savepoints).
#[async_trait]
pub trait NestedTransaction: Transaction {
    async fn begin_nested(&self, options: Option<&TxOptions>)
    -> Result<Box<dyn NestedTransaction>>;
}

#[async_trait]
impl<'a> TransactionStarter for dyn NestedTransaction + 'a {
    type Tx = dyn NestedTransaction;

    async fn begin(&self, options: Option<&TxOptions>) -> Result<Box<Self::Tx>> {
        self.begin_nested(options).await
    }
}

/// What most code should accept as "a database": it runs queries, starts
/// transactions and answers pings.
pub trait Sql: TransactionStarter + Pinger + QueryExecer {}

impl<T> Sql for T where T: TransactionStarter + Pinger + QueryExecer + ?Sized {}

/// [`Sql`] for databases whose transactions can nest.
pub trait SqlNester: TransactionStarter<Tx = dyn NestedTransaction> + Pinger + QueryExecer {}

impl<T> SqlNester for T where
    T: TransactionStarter<Tx = dyn NestedTransaction> + Pinger + QueryExecer + ?Sized
{
}
