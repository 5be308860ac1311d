//! Driver-facing capabilities. A database driver implements the subset of
//! these traits it supports; callers ask for the capability they need.

pub mod value;

pub mod connection;
pub mod driver;
pub mod result;
pub mod rows;
pub mod statement;
