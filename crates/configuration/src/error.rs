//! Errors that can be thrown when reading or writing chart configuration documents.

use std::path::PathBuf;

use thiserror::Error;

/// The errors that can be thrown when parsing chart configuration documents.
#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {}:{line}:{column}: {message}", display_path(.file_path))]
    ParseError {
        file_path: Option<PathBuf>,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("failed to parse chart configuration at index {index}: {source}")]
    ParseErrorAtIndex {
        index: usize,
        #[source]
        source: Box<ParseConfigurationError>,
    },
    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

fn display_path(file_path: &Option<PathBuf>) -> String {
    match file_path {
        Some(path) => path.display().to_string(),
        None => "<input>".to_string(),
    }
}

impl ParseConfigurationError {
    pub(crate) fn from_json(error: &serde_json::Error, file_path: Option<PathBuf>) -> Self {
        ParseConfigurationError::ParseError {
            file_path,
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    }

    /// Attach a file path to an error produced while parsing text.
    pub(crate) fn in_file(self, path: PathBuf) -> Self {
        match self {
            ParseConfigurationError::ParseError {
                line,
                column,
                message,
                ..
            } => ParseConfigurationError::ParseError {
                file_path: Some(path),
                line,
                column,
                message,
            },
            ParseConfigurationError::ParseErrorAtIndex { index, source } => {
                ParseConfigurationError::ParseErrorAtIndex {
                    index,
                    source: Box::new(source.in_file(path)),
                }
            }
            other @ ParseConfigurationError::IoErrorButStringified(_) => other,
        }
    }
}

/// The errors that can be thrown when writing chart configuration documents.
#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error("{}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// The errors that can be thrown when resolving runtime configuration.
#[derive(Debug, Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("missing environment variable when processing {setting}: {message}")]
    MissingEnvironmentVariable {
        setting: &'static str,
        message: String,
    },
}
