use crate::Result;
use crate::error::DbError;
use crate::udbc::value::{FromValue, Value};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// A result set, read one row at a time.
#[async_trait]
pub trait Rows: Send {
    /// The next row, or `None` once the set is exhausted.
    async fn next(&mut self) -> Result<Option<Box<dyn Row>>>;

    /// Releases the result set. Safe to call more than once.
    async fn close(&mut self) -> Result<()>;
}

/// A single row of a result set.
pub trait Row: Send + Sync {
    /// Column names, in select order.
    fn columns(&self) -> &[String];

    /// The raw value of column `index`.
    fn value(&self, index: usize) -> Option<&Value>;
}

impl dyn Row + '_ {
    /// Reads column `index` as `T`.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T> {
        let value = self.value(index).ok_or_else(|| {
            DbError::TypeMismatch(format!(
                "column {} out of range for {} columns",
                index,
                self.columns().len()
            ))
        })?;
        T::from_value(value.clone())
    }

    /// Reads the leading columns into a tuple, one element per column.
    ///
    /// ```
    /// # use vsql::udbc::rows::{Row, ValueRow};
    /// # use vsql::udbc::value::Value;
    /// let row = ValueRow::new(
    ///     vec!["id".to_string(), "name".to_string()].into(),
    ///     vec![Value::I64(1), Value::Str("puppy".to_string())],
    /// );
    /// let row: &dyn Row = &row;
    /// let (id, name): (i64, String) = row.scan().unwrap();
    /// assert_eq!((id, name.as_str()), (1, "puppy"));
    /// ```
    pub fn scan<T: FromRow>(&self) -> Result<T> {
        T::from_row(self)
    }

    /// Column name to value, the shape `#[derive(Param)]` types read from.
    pub fn to_map(&self) -> HashMap<String, Value> {
        self.columns()
            .iter()
            .enumerate()
            .filter_map(|(i, name)| self.value(i).map(|v| (name.clone(), v.clone())))
            .collect()
    }
}

/// Destinations for [`Row::scan`](trait.Row.html#method.scan).
pub trait FromRow: Sized {
    fn from_row(row: &dyn Row) -> Result<Self>;
}

macro_rules! impl_from_row_tuple {
    ($($name:ident : $index:tt),+) => {
        impl<$($name: FromValue),+> FromRow for ($($name,)+) {
            fn from_row(row: &dyn Row) -> Result<Self> {
                Ok(($(row.get::<$name>($index)?,)+))
            }
        }
    };
}

impl_from_row_tuple!(A: 0);
impl_from_row_tuple!(A: 0, B: 1);
impl_from_row_tuple!(A: 0, B: 1, C: 2);
impl_from_row_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_from_row_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_from_row_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_from_row_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_from_row_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

/// A fully materialized row. Rows of one result set share their column list.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRow {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl ValueRow {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }
}

impl Row for ValueRow {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// A result set already held in memory.
#[derive(Debug, Default)]
pub struct VecRows {
    rows: VecDeque<ValueRow>,
    closed: bool,
}

impl VecRows {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let columns: Arc<[String]> = columns.into();
        Self {
            rows: rows
                .into_iter()
                .map(|values| ValueRow::new(columns.clone(), values))
                .collect(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl Rows for VecRows {
    async fn next(&mut self) -> Result<Option<Box<dyn Row>>> {
        if self.closed {
            return Ok(None);
        }
        Ok(self.rows.pop_front().map(|r| Box::new(r) as Box<dyn Row>))
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.rows.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets() -> VecRows {
        VecRows::new(
            vec!["id".to_string(), "name".to_string(), "age".to_string()],
            vec![
                vec![Value::I64(1), Value::Str("puppy".to_string()), Value::I64(5)],
                vec![Value::I64(2), Value::Str("kitten".to_string()), Value::Null],
            ],
        )
    }

    #[tokio::test]
    async fn rows_scan_into_tuples() {
        let mut rows = pets();

        let first = rows.next().await.unwrap().unwrap();
        let (id, name, age): (u64, String, Option<i32>) = first.scan().unwrap();
        assert_eq!((id, name.as_str(), age), (1, "puppy", Some(5)));

        let second = rows.next().await.unwrap().unwrap();
        let age: Option<i32> = second.get(2).unwrap();
        assert_eq!(age, None);
        assert_eq!(second.columns(), ["id", "name", "age"]);

        assert!(rows.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn out_of_range_column_is_an_error() {
        let mut rows = pets();
        let row = rows.next().await.unwrap().unwrap();
        assert!(matches!(row.get::<i64>(3), Err(DbError::TypeMismatch(_))));
    }

    #[tokio::test]
    async fn closed_rows_yield_nothing() {
        let mut rows = pets();
        rows.close().await.unwrap();
        assert!(rows.is_closed());
        assert!(rows.next().await.unwrap().is_none());
    }

    #[test]
    fn to_map_pairs_columns_with_values() {
        let row = ValueRow::new(
            vec!["a".to_string()].into(),
            vec![Value::Bool(true)],
        );
        let row: &dyn Row = &row;
        assert_eq!(row.to_map().get("a"), Some(&Value::Bool(true)));
    }
}
