use chart_query_configuration::connection_settings::DEFAULT_CONNECTION_URI_VARIABLE;
use chart_query_configuration::environment::{FixedEnvironment, Variable};
use chart_query_configuration::values::{PoolSettings, Secret};
use chart_query_configuration::{
    make_runtime_configuration, read_connection_settings, ConnectionUri, DatabaseConnectionSettings,
};
use similar_asserts::assert_eq;

#[test]
fn empty_settings_read_the_uri_from_the_environment() {
    let environment = FixedEnvironment::from([(
        DEFAULT_CONNECTION_URI_VARIABLE.into(),
        "postgresql://charts@localhost/charts".to_string(),
    )]);

    let configuration =
        make_runtime_configuration(DatabaseConnectionSettings::empty(), environment).unwrap();

    assert_eq!(
        configuration.connection_uri,
        "postgresql://charts@localhost/charts"
    );
    assert_eq!(configuration.schema, "public");
    assert_eq!(configuration.pool_settings, PoolSettings::default());
}

#[test]
fn a_missing_variable_is_an_error() {
    let error = make_runtime_configuration(
        DatabaseConnectionSettings::empty(),
        FixedEnvironment::default(),
    )
    .unwrap_err();

    assert_eq!(
        error.to_string(),
        "missing environment variable when processing connectionUri: the environment variable CHART_QUERY_DATABASE_URL is not set"
    );
}

#[test]
fn plain_uris_need_no_environment() {
    let settings = DatabaseConnectionSettings {
        connection_uri: ConnectionUri::from("postgresql://localhost/other"),
        ..DatabaseConnectionSettings::empty()
    };

    let configuration = make_runtime_configuration(settings, FixedEnvironment::default()).unwrap();
    assert_eq!(configuration.connection_uri, "postgresql://localhost/other");
}

#[tokio::test]
async fn reads_settings_files() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("connection.json");
    tokio::fs::write(
        &path,
        r#"{
            "connectionUri": {"variable": "REPORTING_DB"},
            "poolSettings": {"maxConnections": 2},
            "schema": "reporting"
        }"#,
    )
    .await?;

    let settings = read_connection_settings(&path).await?;

    assert_eq!(
        settings.connection_uri,
        ConnectionUri(Secret::FromEnvironment {
            variable: Variable::from("REPORTING_DB")
        })
    );
    assert_eq!(settings.pool_settings.max_connections, 2);
    assert_eq!(
        settings.pool_settings.pool_timeout,
        PoolSettings::default().pool_timeout
    );
    assert_eq!(settings.schema, "reporting");
    Ok(())
}
