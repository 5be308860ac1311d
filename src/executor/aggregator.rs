use crate::Result;
use crate::error::DbError;
use crate::executor::row::query_one;
use crate::param::Query;
use crate::udbc::connection::Queryer;

/// Runs a `select count(*) ...` style query and reads the first column of the
/// first row. No row at all is [`DbError::NoRows`].
pub async fn count<Q>(queryer: &Q, query: &dyn Query) -> Result<u64>
where
    Q: Queryer + ?Sized,
{
    let mut number = 0;
    let found = query_one(queryer, query, |row| {
        number = row.get::<u64>(0)?;
        Ok::<_, DbError>(())
    })
    .await?;

    if !found {
        return Err(DbError::NoRows);
    }
    Ok(number)
}
