use crate::param::strategy::InterpolateStrategy;

/// `Driver` describes the SQL dialect of a database engine.
///
/// Connection handling is left to the driver's own types; what the rest of
/// the crate needs from a driver is how it spells parameter placeholders.
pub trait Driver: Send + Sync {
    /// Returns the name of the driver.
    ///
    /// Example: "postgres", "mysql", "sqlite"
    fn name(&self) -> &str;

    /// Returns the type of the driver, distinguishing engines that share a
    /// wire protocol.
    fn r#type(&self) -> &str;

    /// A fresh placeholder strategy for one binding pass.
    ///
    /// Example outputs of the strategy:
    /// - PostgreSQL: `$1`, `$2`, ...
    /// - MySQL / SQLite: `?`
    fn strategy(&self) -> Box<dyn InterpolateStrategy>;
}
