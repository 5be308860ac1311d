use crate::Result;
use crate::error::DbError;
use crate::param::normalize::NamedTemplate;
use crate::param::{BoundQuery, InterpolateStrategy, Parameterer, Query};
use crate::udbc::value::{ToValue, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Parameters looked up by name from `:name` markers.
///
/// The template is parsed on first use and the parse kept with the query, so
/// binding the same `Named` again only looks up values and renders.
///
/// ```
/// use vsql::param::{Named, Query, QuestionMark};
///
/// let mut q = Named::new("select * from pets where name = :pet and age = :age");
/// q.set("age", 5);
/// q.set("pet", "puppy");
///
/// let bound = q.bind(&mut QuestionMark).unwrap();
/// assert_eq!(bound.sql, "select * from pets where name = ? and age = ?");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Named {
    sql: String,
    parameters: HashMap<String, Value>,
    template: OnceLock<NamedTemplate>,
}

impl Named {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            parameters: HashMap::new(),
            template: OnceLock::new(),
        }
    }

    pub fn with_data(sql: impl Into<String>, parameters: HashMap<String, Value>) -> Self {
        Self {
            sql: sql.into(),
            parameters,
            template: OnceLock::new(),
        }
    }

    /// Values only, for binding against a prepared statement's template.
    pub fn data(parameters: HashMap<String, Value>) -> Self {
        Self::with_data(String::new(), parameters)
    }

    /// Takes the fields of a struct-shaped source (anything whose
    /// [`ToValue`] yields a [`Value::Map`], e.g. `#[derive(Param)]` types).
    pub fn from_params<T: ToValue + ?Sized>(sql: impl Into<String>, params: &T) -> Result<Self> {
        match params.to_value() {
            Value::Map(parameters) => Ok(Self::with_data(sql, parameters)),
            other => Err(DbError::TypeMismatch(format!(
                "named parameters must come from a map, got {:?}",
                other
            ))),
        }
    }

    /// Adds or overwrites a value.
    pub fn set(&mut self, name: impl Into<String>, value: impl ToValue) -> &mut Self {
        self.parameters.insert(name.into(), value.to_value());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// The parse of this query's own template. A malformed template is
    /// reported on every call and never kept.
    fn parsed(&self) -> Result<&NamedTemplate> {
        if let Some(template) = self.template.get() {
            return Ok(template);
        }
        let parsed = NamedTemplate::parse(&self.sql)?;
        Ok(self.template.get_or_init(|| parsed))
    }
}

impl Parameterer for Named {
    fn interpolate(
        &self,
        sql: &str,
        strategy: &mut dyn InterpolateStrategy,
    ) -> Result<BoundQuery> {
        // a prepared statement's template is parsed per call
        let other;
        let template = if sql == self.sql {
            self.parsed()?
        } else {
            other = NamedTemplate::parse(sql)?;
            &other
        };

        let mut values = Vec::with_capacity(template.placeholder_count());
        for name in template.names() {
            let value = self
                .parameters
                .get(name)
                .ok_or_else(|| DbError::MissingNamedParameter(name.clone()))?;
            values.push(value.clone());
        }

        Ok(BoundQuery {
            sql: template.render(strategy),
            values,
        })
    }
}

impl Query for Named {
    fn sql_template(&self) -> &str {
        &self.sql
    }

    fn sql_query(&self, strategy: &mut dyn InterpolateStrategy) -> Result<String> {
        Ok(self.parsed()?.render(strategy))
    }
}
