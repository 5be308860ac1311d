//! Driver placeholder syntax.
//!
//! A strategy renders the token a driver expects at each parameter position.
//! It is called exactly once per placeholder, left to right, so counting
//! strategies such as [`Numbered`] carry state and must not be shared between
//! binding passes. Drivers hand out a fresh instance per pass through
//! [`Driver::strategy`](crate::udbc::driver::Driver::strategy).

/// Produces the next driver-specific placeholder token.
pub trait InterpolateStrategy: Send {
    fn next_placeholder(&mut self) -> String;
}

/// Builds a fresh strategy for one binding pass.
pub type StrategyFactory = fn() -> Box<dyn InterpolateStrategy>;

/// `?` for every placeholder (MySQL, SQLite).
#[derive(Debug, Default, Clone, Copy)]
pub struct QuestionMark;

impl QuestionMark {
    pub fn boxed() -> Box<dyn InterpolateStrategy> {
        Box::new(QuestionMark)
    }
}

impl InterpolateStrategy for QuestionMark {
    fn next_placeholder(&mut self) -> String {
        "?".to_string()
    }
}

/// `$1`, `$2`, ... (PostgreSQL), or any other prefix followed by a 1-based
/// sequence number.
#[derive(Debug, Clone)]
pub struct Numbered {
    prefix: String,
    count: usize,
}

impl Default for Numbered {
    fn default() -> Self {
        Self::new()
    }
}

impl Numbered {
    pub fn new() -> Self {
        Self::with_prefix("$")
    }

    /// e.g. `":"` for Oracle-style `:1`, `"@p"` for SQL Server.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            count: 0,
        }
    }

    pub fn boxed() -> Box<dyn InterpolateStrategy> {
        Box::new(Self::new())
    }

    /// Number of placeholders handed out so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl InterpolateStrategy for Numbered {
    fn next_placeholder(&mut self) -> String {
        self.count += 1;
        format!("{}{}", self.prefix, self.count)
    }
}
