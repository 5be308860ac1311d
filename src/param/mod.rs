//! SQL templates with named (`:name`) or positional (`?`) parameters, and
//! their translation into a driver's own placeholder syntax.

pub mod append;
pub mod named;
pub mod normalize;
pub mod strategy;

pub use append::Append;
pub use named::Named;
pub use strategy::{InterpolateStrategy, Numbered, QuestionMark, StrategyFactory};

use crate::Result;
use crate::udbc::value::Value;

/// Driver-ready SQL and the values for its placeholders, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub sql: String,
    pub values: Vec<Value>,
}

/// A set of parameter values that can be bound against a SQL template.
pub trait Parameterer: Send + Sync {
    /// Rewrites `sql` into the strategy's placeholder syntax and orders the
    /// values to match.
    fn interpolate(&self, sql: &str, strategy: &mut dyn InterpolateStrategy)
    -> Result<BoundQuery>;
}

/// Parameters that carry their own SQL template.
pub trait Query: Parameterer {
    /// The template as written, markers included.
    fn sql_template(&self) -> &str;

    /// The driver-ready SQL without resolving any values.
    fn sql_query(&self, strategy: &mut dyn InterpolateStrategy) -> Result<String>;

    fn bind(&self, strategy: &mut dyn InterpolateStrategy) -> Result<BoundQuery> {
        self.interpolate(self.sql_template(), strategy)
    }
}
