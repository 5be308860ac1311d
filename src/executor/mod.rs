pub mod aggregator;
pub mod exec;
pub mod row;
pub mod transaction;
