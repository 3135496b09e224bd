//! Errors for query execution and introspection.

use thiserror::Error;

/// Query execution error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Query(#[from] QueryError),
    #[error("database error: {0}")]
    DB(#[from] sqlx::Error),
    #[error("error getting {kind} types: {source}")]
    TypeIntrospection {
        kind: &'static str,
        #[source]
        source: Box<Error>,
    },
}

/// Results the database returned that we cannot make sense of.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("number {0} cannot be bound as a query parameter")]
    UnrepresentableNumber(serde_json::Number),
    #[error("expected a non-empty JSON object per row, got: {0}")]
    UnexpectedRow(serde_json::Value),
    #[error("unable to read the {what} returned by the database: {source}")]
    UnexpectedIntrospectionResult {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn getting_types(kind: &'static str) -> impl FnOnce(Error) -> Error {
        move |source| Error::TypeIntrospection {
            kind,
            source: Box::new(source),
        }
    }
}
