//! Named and positional SQL parameters for any driver's placeholder syntax,
//! plus the capability traits and helpers drivers and callers meet at.
//!
//! ```
//! use vsql::param::{Named, Numbered, Query};
//! use vsql::udbc::value::Value;
//!
//! let mut q = Named::new("select * from t where a = :x and b = :y");
//! q.set("y", 5);
//! q.set("x", "puppy");
//!
//! let bound = q.bind(&mut Numbered::new()).unwrap();
//! assert_eq!(bound.sql, "select * from t where a = $1 and b = $2");
//! // values follow the markers, not the order they were set
//! assert_eq!(bound.values, vec![Value::Str("puppy".into()), Value::I32(5)]);
//! ```

pub mod error;
pub mod executor;
pub mod param;
pub mod transaction;
pub mod udbc;

pub use vsql_macros::Param;

pub type Result<T> = std::result::Result<T, error::DbError>;
