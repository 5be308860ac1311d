use crate::Result;
use crate::error::DbError;
use crate::param::normalize::{count_positional, normalize_positional};
use crate::param::{BoundQuery, InterpolateStrategy, Parameterer, Query};
use crate::udbc::value::{ToValue, Value};

/// Parameters bound in the order they were appended, one per `?`.
#[derive(Debug, Clone, Default)]
pub struct Append {
    sql: String,
    parameters: Vec<Value>,
}

impl Append {
    /// A query with no parameters yet. Also the way to run SQL that takes none.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_data(sql: impl Into<String>, parameters: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }

    /// Values only, for binding against a prepared statement's template.
    pub fn data(parameters: Vec<Value>) -> Self {
        Self::with_data(String::new(), parameters)
    }

    pub fn append(&mut self, value: impl ToValue) -> &mut Self {
        self.parameters.push(value.to_value());
        self
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl Parameterer for Append {
    fn interpolate(
        &self,
        sql: &str,
        strategy: &mut dyn InterpolateStrategy,
    ) -> Result<BoundQuery> {
        let placeholders = count_positional(sql);
        if placeholders != self.parameters.len() {
            return Err(DbError::PlaceholderCountMismatch {
                placeholders,
                values: self.parameters.len(),
            });
        }

        Ok(BoundQuery {
            sql: normalize_positional(sql, strategy),
            values: self.parameters.clone(),
        })
    }
}

impl Query for Append {
    fn sql_template(&self) -> &str {
        &self.sql
    }

    fn sql_query(&self, strategy: &mut dyn InterpolateStrategy) -> Result<String> {
        Ok(normalize_positional(&self.sql, strategy))
    }
}
