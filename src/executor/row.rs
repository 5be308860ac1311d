use crate::error::DbError;
use crate::param::Query;
use crate::udbc::connection::Queryer;
use crate::udbc::rows::{Row, Rows};
use log::warn;
use std::ops::ControlFlow;

/// Calls `each_row` for every row until it breaks or fails. `rows` is closed
/// on every path.
pub async fn each<F, E>(mut rows: Box<dyn Rows>, mut each_row: F) -> Result<(), E>
where
    F: FnMut(&dyn Row) -> Result<ControlFlow<()>, E>,
    E: From<DbError>,
{
    let result = walk(rows.as_mut(), &mut each_row).await;
    close(rows.as_mut(), result).await
}

async fn walk<F, E>(rows: &mut dyn Rows, each_row: &mut F) -> Result<(), E>
where
    F: FnMut(&dyn Row) -> Result<ControlFlow<()>, E>,
    E: From<DbError>,
{
    while let Some(row) = rows.next().await? {
        if each_row(row.as_ref())?.is_break() {
            break;
        }
    }
    Ok(())
}

/// Runs `query` and walks its rows with [`each`]. A [`DbError::NoRows`] from
/// the query means there is nothing to walk.
pub async fn query_each<Q, F, E>(queryer: &Q, query: &dyn Query, each_row: F) -> Result<(), E>
where
    Q: Queryer + ?Sized,
    F: FnMut(&dyn Row) -> Result<ControlFlow<()>, E>,
    E: From<DbError>,
{
    match queryer.query(query).await {
        Ok(rows) => each(rows, each_row).await,
        Err(DbError::NoRows) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Hands the first row, if any, to `the_row`. Returns whether there was one.
pub async fn one<F, E>(mut rows: Box<dyn Rows>, the_row: F) -> Result<bool, E>
where
    F: FnOnce(&dyn Row) -> Result<(), E>,
    E: From<DbError>,
{
    let result = match rows.next().await {
        Ok(Some(row)) => the_row(row.as_ref()).map(|_| true),
        Ok(None) => Ok(false),
        Err(e) => Err(e.into()),
    };
    close(rows.as_mut(), result).await
}

/// Runs `query` and hands its first row to `the_row`, as [`one`].
pub async fn query_one<Q, F, E>(queryer: &Q, query: &dyn Query, the_row: F) -> Result<bool, E>
where
    Q: Queryer + ?Sized,
    F: FnOnce(&dyn Row) -> Result<(), E>,
    E: From<DbError>,
{
    match queryer.query(query).await {
        Ok(rows) => one(rows, the_row).await,
        Err(DbError::NoRows) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

// A close failure is only reported when nothing failed before it.
async fn close<T, E>(rows: &mut dyn Rows, result: Result<T, E>) -> Result<T, E>
where
    E: From<DbError>,
{
    match (rows.close().await, result) {
        (Ok(()), result) => result,
        (Err(e), Ok(_)) => Err(e.into()),
        (Err(e), Err(original)) => {
            warn!("Closing rows after a failed read failed: {}", e);
            Err(original)
        }
    }
}
