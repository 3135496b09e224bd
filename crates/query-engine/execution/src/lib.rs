//! Running chart queries against a PostgreSQL database, and reading its catalogs.

pub mod error;
pub mod execution;
pub mod introspection;
pub mod metrics;
pub mod rows;
