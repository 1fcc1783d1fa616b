//! Persisted output
//!
//! The collector's only durable artifact is delimited text; see [`csv`].

pub mod csv;

pub use self::csv::write_table;
