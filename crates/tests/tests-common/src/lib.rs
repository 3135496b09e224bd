//! Helpers shared by the test suites of the workspace crates.

pub mod database;
pub mod goldenfiles;
pub mod query;
