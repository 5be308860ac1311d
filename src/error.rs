use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// A `:name` marker in the template has no value in the parameter store.
    #[error("Named parameter \"{0}\" was not set to a value")]
    MissingNamedParameter(String),
    #[error(
        "Interpolation failed: {values} parameters were provided for {placeholders} placeholders"
    )]
    PlaceholderCountMismatch { placeholders: usize, values: usize },
    /// A `:` at byte `position` is not followed by an identifier.
    #[error("Malformed named parameter at byte {position}: ':' must be followed by an identifier")]
    MalformedIdentifier { position: usize },
    #[error("No rows in result set")]
    NoRows,
    #[error("Data Conversion Error: {0}")]
    TypeMismatch(String),
    #[error("Unsupported: {0}")]
    Unsupported(String),
    #[error("Transaction Error: {0}")]
    TransactionError(String),
    #[error("Driver Error: {0}")]
    DriverError(String),
}

pub type Error = DbError;
