//! Translate a chart configuration into a parameterized SQL query.

pub mod error;
pub mod query;

use chart_query_configuration::{validate_and_normalize, ChartSpec};
use query_engine_sql::sql;

pub use error::{ChartQueryError, Error};

/// Validate and normalize a chart configuration in place, then translate it.
pub fn to_sql(chart: &mut ChartSpec) -> Result<sql::string::SQL, ChartQueryError> {
    validate_and_normalize(chart)?;
    Ok(query::translate(chart)?)
}
