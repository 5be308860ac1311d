use crate::Result;
use crate::param::{BoundQuery, InterpolateStrategy, Parameterer, Query};
use crate::udbc::driver::Driver;
use log::debug;
use std::time::Instant;

/// Binds a query for `driver`, with a fresh placeholder strategy.
///
/// This is what a driver's `query`/`exec`/`insert` call before handing the
/// SQL and values to the database.
pub fn bind(driver: &dyn Driver, query: &dyn Query) -> Result<BoundQuery> {
    logged(driver, query.sql_template(), |strategy| query.bind(strategy))
}

/// Binds `params` against `sql` (a prepared statement's template) for `driver`.
pub fn bind_params(driver: &dyn Driver, sql: &str, params: &dyn Parameterer) -> Result<BoundQuery> {
    logged(driver, sql, |strategy| params.interpolate(sql, strategy))
}

fn logged<F>(driver: &dyn Driver, sql: &str, f: F) -> Result<BoundQuery>
where
    F: FnOnce(&mut dyn InterpolateStrategy) -> Result<BoundQuery>,
{
    let start = Instant::now();
    let mut strategy = driver.strategy();
    let result = f(strategy.as_mut());
    let elapsed = start.elapsed().as_micros();

    match &result {
        Ok(bound) => debug!(
            "Bind: driver={}, sql=\n{}, params={:?}, elapsed={}us",
            driver.name(),
            &bound.sql,
            &bound.values,
            elapsed
        ),
        Err(e) => debug!(
            "Bind: driver={}, template=\n{}, elapsed={}us, error={:?}",
            driver.name(),
            sql,
            elapsed,
            e
        ),
    }

    result
}
