//! Errors for query translation.

use chart_query_configuration::ValidationError;
use thiserror::Error;

/// A filter whose values cannot be expressed as a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    NullInBetween { column: String },
    NullComparison { operator: String, column: String },
}

/// Display errors.
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::NullInBetween { column } => {
                write!(
                    f,
                    "BETWEEN operator cannot have NULL values (filter on '{column}')"
                )
            }
            Error::NullComparison { operator, column } => write!(
                f,
                "comparison operator {operator} cannot compare with NULL (filter on '{column}')"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// The stage at which turning a chart into SQL failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartQueryError {
    #[error("invalid chart configuration: {0}")]
    Validation(#[from] ValidationError),
    #[error("unable to build chart query: {0}")]
    Build(#[from] Error),
}
