//! Reading and writing chart configuration documents.

use std::path::Path;

use schemars::schema::RootSchema;
use serde_json::value::RawValue;
use tokio::fs;

use crate::chart::ChartSpec;
use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};

/// Parse a single chart configuration from JSON text.
pub fn parse_chart_config(text: &str) -> Result<ChartSpec, ParseConfigurationError> {
    serde_json::from_str(text).map_err(|error| ParseConfigurationError::from_json(&error, None))
}

/// Parse a JSON array of chart configurations.
/// A malformed element is reported with its position in the array.
pub fn parse_chart_configs(text: &str) -> Result<Vec<ChartSpec>, ParseConfigurationError> {
    let elements: Vec<Box<RawValue>> = serde_json::from_str(text)
        .map_err(|error| ParseConfigurationError::from_json(&error, None))?;

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            parse_chart_config(element.get()).map_err(|error| {
                ParseConfigurationError::ParseErrorAtIndex {
                    index,
                    source: Box::new(error),
                }
            })
        })
        .collect()
}

/// Render a chart configuration as pretty-printed JSON.
pub fn chart_config_to_string(chart: &ChartSpec) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(chart)
}

/// Read a single chart configuration from a file.
pub async fn read_chart_config(
    path: impl AsRef<Path>,
) -> Result<ChartSpec, ParseConfigurationError> {
    let path = path.as_ref();
    let contents = read_file(path).await?;
    parse_chart_config(&contents).map_err(|error| error.in_file(path.to_owned()))
}

/// Read a JSON array of chart configurations from a file.
pub async fn read_chart_configs(
    path: impl AsRef<Path>,
) -> Result<Vec<ChartSpec>, ParseConfigurationError> {
    let path = path.as_ref();
    let contents = read_file(path).await?;
    parse_chart_configs(&contents).map_err(|error| error.in_file(path.to_owned()))
}

/// Read a file holding either one chart configuration or a JSON array of them.
pub async fn read_chart_document(
    path: impl AsRef<Path>,
) -> Result<Vec<ChartSpec>, ParseConfigurationError> {
    let path = path.as_ref();
    let contents = read_file(path).await?;
    let charts = if contents.trim_start().starts_with('[') {
        parse_chart_configs(&contents)
    } else {
        parse_chart_config(&contents).map(|chart| vec![chart])
    };
    charts.map_err(|error| error.in_file(path.to_owned()))
}

async fn read_file(path: &Path) -> Result<String, ParseConfigurationError> {
    tracing::debug!(path = %path.display(), "reading chart configuration");
    fs::read_to_string(path).await.map_err(|err| {
        ParseConfigurationError::IoErrorButStringified(format!("{}: {}", path.display(), err))
    })
}

/// Write a chart configuration to a file, creating parent directories as needed.
pub async fn write_chart_config(
    chart: &ChartSpec,
    path: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    write_json_file(path.as_ref(), chart_config_to_string(chart)?).await
}

/// The JSON schema chart configuration documents conform to.
pub fn chart_config_schema() -> RootSchema {
    schemars::schema_for!(ChartSpec)
}

/// Write the chart configuration JSON schema to a file.
pub async fn write_chart_config_schema(
    path: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let schema = serde_json::to_string_pretty(&chart_config_schema())?;
    write_json_file(path.as_ref(), schema).await
}

async fn write_json_file(
    path: &Path,
    contents: String,
) -> Result<(), WriteParsedConfigurationError> {
    let io_error = |source| WriteParsedConfigurationError::IoError {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }
    }

    tracing::debug!(path = %path.display(), "writing chart configuration");
    fs::write(path, contents + "\n").await.map_err(io_error)
}
