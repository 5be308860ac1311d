#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vsql::error::DbError;
use vsql::executor::exec;
use vsql::param::{BoundQuery, InterpolateStrategy, Numbered, Parameterer, Query, QuestionMark, StrategyFactory};
use vsql::transaction::{NestedTransaction, Transaction, TransactionStarter, TxOptions};
use vsql::udbc::connection::{Execer, Inserter, Pinger, Preparer, Queryer};
use vsql::udbc::driver::Driver;
use vsql::udbc::result::{ExecResult, InsertResult, QueryResult};
use vsql::udbc::rows::{Row, Rows, VecRows};
use vsql::udbc::statement::Statement;
use vsql::udbc::value::Value;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone)]
pub struct MockDriver {
    name: &'static str,
    factory: StrategyFactory,
}

impl MockDriver {
    pub fn postgres() -> Self {
        Self {
            name: "postgres",
            factory: Numbered::boxed,
        }
    }

    pub fn mysql() -> Self {
        Self {
            name: "mysql",
            factory: QuestionMark::boxed,
        }
    }
}

impl Driver for MockDriver {
    fn name(&self) -> &str {
        self.name
    }

    fn r#type(&self) -> &str {
        self.name
    }

    fn strategy(&self) -> Box<dyn InterpolateStrategy> {
        (self.factory)()
    }
}

#[derive(Clone)]
struct Config {
    driver: MockDriver,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    empty_is_no_rows: bool,
    fail_begin: bool,
    fail_commit: bool,
    fail_rollback: bool,
    fail_query: bool,
    fail_close: bool,
}

/// An in-memory stand-in for a database. Every call is written to a journal
/// shared with the transactions, statements and rows it hands out.
#[derive(Clone)]
pub struct MockDb {
    config: Arc<Config>,
    journal: Arc<Mutex<Vec<String>>>,
    bound: Arc<Mutex<Vec<BoundQuery>>>,
}

impl MockDb {
    pub fn new(driver: MockDriver) -> Self {
        init_logging();
        Self {
            config: Arc::new(Config {
                driver,
                columns: Vec::new(),
                rows: Vec::new(),
                empty_is_no_rows: false,
                fail_begin: false,
                fail_commit: false,
                fail_rollback: false,
                fail_query: false,
                fail_close: false,
            }),
            journal: Arc::new(Mutex::new(Vec::new())),
            bound: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn rows(mut self, columns: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let config = Arc::make_mut(&mut self.config);
        config.columns = columns.iter().map(|c| c.to_string()).collect();
        config.rows = rows;
        self
    }

    /// Report an empty result as `DbError::NoRows` instead of an empty set.
    pub fn empty_is_no_rows(mut self) -> Self {
        Arc::make_mut(&mut self.config).empty_is_no_rows = true;
        self
    }

    pub fn fail_begin(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_begin = true;
        self
    }

    pub fn fail_commit(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_commit = true;
        self
    }

    pub fn fail_rollback(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_rollback = true;
        self
    }

    pub fn fail_query(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_query = true;
        self
    }

    pub fn fail_close(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_close = true;
        self
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.journal().iter().filter(|e| e.as_str() == entry).count()
    }

    pub fn last_bound(&self) -> Option<BoundQuery> {
        self.bound.lock().unwrap().last().cloned()
    }

    fn record(&self, entry: impl Into<String>) {
        self.journal.lock().unwrap().push(entry.into());
    }

    fn run(&self, kind: &str, bound: BoundQuery) {
        self.record(format!("{}: {}", kind, bound.sql));
        self.bound.lock().unwrap().push(bound);
    }

    fn result_set(&self) -> Result<Box<dyn Rows>, DbError> {
        if self.config.fail_query {
            return Err(DbError::DriverError("query failed".to_string()));
        }
        if self.config.rows.is_empty() && self.config.empty_is_no_rows {
            return Err(DbError::NoRows);
        }
        Ok(Box::new(MockRows {
            rows: VecRows::new(self.config.columns.clone(), self.config.rows.clone()),
            db: self.clone(),
        }))
    }

    async fn do_query(&self, query: &dyn Query) -> Result<Box<dyn Rows>, DbError> {
        self.run("query", exec::bind(&self.config.driver, query)?);
        self.result_set()
    }

    async fn do_insert(&self, query: &dyn Query) -> Result<Box<dyn InsertResult>, DbError> {
        self.run("insert", exec::bind(&self.config.driver, query)?);
        Ok(Box::new(QueryResult::inserted(1, 42)))
    }

    async fn do_exec(&self, query: &dyn Query) -> Result<Box<dyn ExecResult>, DbError> {
        self.run("exec", exec::bind(&self.config.driver, query)?);
        Ok(Box::new(QueryResult::new(1)))
    }

    async fn do_prepare(&self, query: &dyn Query) -> Result<Box<dyn Statement>, DbError> {
        let mut strategy = self.config.driver.strategy();
        self.record(format!("prepare: {}", query.sql_query(strategy.as_mut())?));
        Ok(Box::new(MockStatement {
            template: query.sql_template().to_string(),
            db: self.clone(),
        }))
    }

    fn open(&self, depth: usize) -> Result<Box<dyn NestedTransaction>, DbError> {
        if self.config.fail_begin {
            return Err(DbError::TransactionError("begin failed".to_string()));
        }
        match depth {
            0 => self.record("begin"),
            n => self.record(format!("savepoint sp{}", n)),
        }
        Ok(Box::new(MockTx {
            db: self.clone(),
            depth,
        }))
    }
}

#[async_trait]
impl Queryer for MockDb {
    async fn query(&self, query: &dyn Query) -> Result<Box<dyn Rows>, DbError> {
        self.do_query(query).await
    }
}

#[async_trait]
impl Inserter for MockDb {
    async fn insert(&self, query: &dyn Query) -> Result<Box<dyn InsertResult>, DbError> {
        self.do_insert(query).await
    }
}

#[async_trait]
impl Execer for MockDb {
    async fn exec(&self, query: &dyn Query) -> Result<Box<dyn ExecResult>, DbError> {
        self.do_exec(query).await
    }
}

#[async_trait]
impl Preparer for MockDb {
    async fn prepare(&self, query: &dyn Query) -> Result<Box<dyn Statement>, DbError> {
        self.do_prepare(query).await
    }
}

#[async_trait]
impl Pinger for MockDb {
    async fn ping(&self) -> Result<(), DbError> {
        self.record("ping");
        Ok(())
    }
}

#[async_trait]
impl TransactionStarter for MockDb {
    type Tx = dyn NestedTransaction;

    async fn begin(&self, options: Option<&TxOptions>) -> Result<Box<Self::Tx>, DbError> {
        if let Some(options) = options {
            self.record(format!(
                "options: {:?} read_only={}",
                options.level(),
                options.is_read_only()
            ));
        }
        self.open(0)
    }
}

/// A transaction on [`MockDb`]. Depth 0 is the outer transaction; deeper
/// ones stand for savepoints.
pub struct MockTx {
    db: MockDb,
    depth: usize,
}

#[async_trait]
impl Queryer for MockTx {
    async fn query(&self, query: &dyn Query) -> Result<Box<dyn Rows>, DbError> {
        self.db.do_query(query).await
    }
}

#[async_trait]
impl Inserter for MockTx {
    async fn insert(&self, query: &dyn Query) -> Result<Box<dyn InsertResult>, DbError> {
        self.db.do_insert(query).await
    }
}

#[async_trait]
impl Execer for MockTx {
    async fn exec(&self, query: &dyn Query) -> Result<Box<dyn ExecResult>, DbError> {
        self.db.do_exec(query).await
    }
}

#[async_trait]
impl Preparer for MockTx {
    async fn prepare(&self, query: &dyn Query) -> Result<Box<dyn Statement>, DbError> {
        self.db.do_prepare(query).await
    }
}

#[async_trait]
impl Transaction for MockTx {
    async fn commit(&self) -> Result<(), DbError> {
        match self.depth {
            0 => self.db.record("commit"),
            n => self.db.record(format!("release sp{}", n)),
        }
        if self.db.config.fail_commit {
            return Err(DbError::TransactionError("commit failed".to_string()));
        }
        Ok(())
    }

    async fn rollback(&self) -> Result<(), DbError> {
        match self.depth {
            0 => self.db.record("rollback"),
            n => self.db.record(format!("rollback to sp{}", n)),
        }
        if self.db.config.fail_rollback {
            return Err(DbError::TransactionError("rollback failed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl NestedTransaction for MockTx {
    async fn begin_nested(
        &self,
        _options: Option<&TxOptions>,
    ) -> Result<Box<dyn NestedTransaction>, DbError> {
        self.db.open(self.depth + 1)
    }
}

pub struct MockStatement {
    template: String,
    db: MockDb,
}

#[async_trait]
impl Statement for MockStatement {
    async fn query(&self, params: &dyn Parameterer) -> Result<Box<dyn Rows>, DbError> {
        let bound = exec::bind_params(&self.db.config.driver, &self.template, params)?;
        self.db.run("statement query", bound);
        self.db.result_set()
    }

    async fn insert(&self, params: &dyn Parameterer) -> Result<Box<dyn InsertResult>, DbError> {
        let bound = exec::bind_params(&self.db.config.driver, &self.template, params)?;
        self.db.run("statement insert", bound);
        Ok(Box::new(QueryResult::inserted(1, 42)))
    }

    async fn exec(&self, params: &dyn Parameterer) -> Result<Box<dyn ExecResult>, DbError> {
        let bound = exec::bind_params(&self.db.config.driver, &self.template, params)?;
        self.db.run("statement exec", bound);
        Ok(Box::new(QueryResult::new(1)))
    }

    async fn close(&self) -> Result<(), DbError> {
        self.db.record("statement close");
        Ok(())
    }
}

struct MockRows {
    rows: VecRows,
    db: MockDb,
}

#[async_trait]
impl Rows for MockRows {
    async fn next(&mut self) -> Result<Option<Box<dyn Row>>, DbError> {
        self.rows.next().await
    }

    async fn close(&mut self) -> Result<(), DbError> {
        self.rows.close().await?;
        self.db.record("close rows");
        if self.db.config.fail_close {
            return Err(DbError::DriverError("close failed".to_string()));
        }
        Ok(())
    }
}
