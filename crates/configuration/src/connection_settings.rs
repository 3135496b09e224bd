//! Database connection settings.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::ParseConfigurationError;
use crate::values::{ConnectionUri, PoolSettings, Secret};

pub const DEFAULT_CONNECTION_URI_VARIABLE: &str = "CHART_QUERY_DATABASE_URL";
pub const DEFAULT_SCHEMA: &str = "public";

/// Database connection settings.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConnectionSettings {
    /// Connection string for a Postgres-compatible database.
    pub connection_uri: ConnectionUri,
    /// Connection pool settings.
    #[serde(default, skip_serializing_if = "PoolSettings::is_default")]
    pub pool_settings: PoolSettings,
    /// The schema introspection looks at.
    #[serde(default = "default_schema")]
    pub schema: String,
}

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

impl DatabaseConnectionSettings {
    pub fn empty() -> Self {
        Self {
            connection_uri: ConnectionUri(Secret::FromEnvironment {
                variable: DEFAULT_CONNECTION_URI_VARIABLE.into(),
            }),
            pool_settings: PoolSettings::default(),
            schema: default_schema(),
        }
    }
}

/// Read connection settings from a JSON file.
pub async fn read_connection_settings(
    path: impl AsRef<Path>,
) -> Result<DatabaseConnectionSettings, ParseConfigurationError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).await.map_err(|err| {
        ParseConfigurationError::IoErrorButStringified(format!("{}: {}", path.display(), err))
    })?;
    serde_json::from_str(&contents)
        .map_err(|error| ParseConfigurationError::from_json(&error, Some(path.to_owned())))
}
