//! Runtime configuration for talking to the database.

use crate::connection_settings::DatabaseConnectionSettings;
use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::values::{ConnectionUri, PoolSettings};

/// Everything needed to open a connection pool, with secrets resolved.
///
/// Values of this type are produced from [`DatabaseConnectionSettings`] using
/// [`make_runtime_configuration`].
#[derive(Debug, Clone)]
pub struct Configuration {
    pub connection_uri: String,
    pub pool_settings: PoolSettings,
    pub schema: String,
}

/// Resolve the settings' secrets against an environment.
pub fn make_runtime_configuration(
    settings: DatabaseConnectionSettings,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let ConnectionUri(uri) = &settings.connection_uri;
    let connection_uri = uri.resolve(environment).map_err(|error| {
        MakeRuntimeConfigurationError::MissingEnvironmentVariable {
            setting: "connectionUri",
            message: error.to_string(),
        }
    })?;

    Ok(Configuration {
        connection_uri,
        pool_settings: settings.pool_settings,
        schema: settings.schema,
    })
}
