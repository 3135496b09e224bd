//! Transient state used by the commands that talk to the database.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tracing::{info_span, Instrument};

use chart_query_configuration::environment::Environment;
use chart_query_configuration::error::{MakeRuntimeConfigurationError, ParseConfigurationError};
use chart_query_configuration::{
    make_runtime_configuration, read_connection_settings, Configuration, ConnectionUri,
    DatabaseConnectionSettings,
};
use query_engine_execution::metrics;

use crate::ConnectionArgs;

/// A connection pool and the metrics recorded while using it.
#[derive(Clone)]
pub struct State {
    pub pool: PgPool,
    pub metrics: metrics::Metrics,
}

/// Resolve the connection arguments into a runtime configuration.
pub async fn make_configuration(
    args: &ConnectionArgs,
    environment: impl Environment,
) -> Result<Configuration, InitializationError> {
    let mut settings = match &args.settings {
        Some(path) => read_connection_settings(path).await?,
        None => DatabaseConnectionSettings::empty(),
    };
    if let Some(uri) = &args.connection_uri {
        settings.connection_uri = ConnectionUri::from(uri.as_str());
    }
    Ok(make_runtime_configuration(settings, environment)?)
}

/// Create a connection pool and wrap it inside a State.
pub async fn create_state(
    configuration: &Configuration,
    metrics_registry: &mut prometheus::Registry,
) -> Result<State, InitializationError> {
    let pool = create_pool(configuration)
        .instrument(info_span!("Create connection pool"))
        .await
        .map_err(InitializationError::UnableToCreatePool)?;

    let metrics = metrics::initialise_metrics(metrics_registry)?;
    Ok(State { pool, metrics })
}

/// Create a connection pool with the configured settings.
async fn create_pool(configuration: &Configuration) -> Result<PgPool, sqlx::Error> {
    let pool_settings = &configuration.pool_settings;
    PgPoolOptions::new()
        .max_connections(pool_settings.max_connections)
        .acquire_timeout(Duration::from_secs(pool_settings.pool_timeout))
        .idle_timeout(pool_settings.idle_timeout.map(Duration::from_secs))
        .max_lifetime(pool_settings.connection_lifetime.map(Duration::from_secs))
        .connect(&configuration.connection_uri)
        .await
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to read connection settings: {0}")]
    Settings(#[from] ParseConfigurationError),
    #[error("{0}")]
    Configuration(#[from] MakeRuntimeConfigurationError),
    #[error("unable to initialize connection pool: {0}")]
    UnableToCreatePool(sqlx::Error),
    #[error("{0}")]
    Metrics(#[from] metrics::InitializationError),
}
