//! The commands, writing their results to any output.

use std::io::Write;
use std::path::Path;

use anyhow::Context;

use chart_query_configuration::environment::Environment;
use chart_query_configuration::{
    chart_config_schema, chart_config_to_string, read_chart_config, read_chart_document,
    validate_and_normalize, write_chart_config_schema, ChartSpec,
};
use query_engine_execution::{execution, introspection};
use query_engine_sql::sql;
use query_engine_translation::translation;

use crate::state::{self, State};
use crate::{Command, ConnectionArgs};

/// Run a command. Commands that need a database connect to it first.
pub async fn run(
    command: Command,
    connection: &ConnectionArgs,
    environment: impl Environment,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Validate { file } => validate(&file, out).await,
        Command::Build { file, pretty } => build(&file, pretty, out).await,
        Command::Schema { output } => schema(output.as_deref(), out).await,
        Command::Explain { file } => {
            let connected = connect(connection, environment).await?;
            let result = explain(&connected.state, &file, out).await;
            connected.finish(connection, result)
        }
        Command::Run { file } => {
            let connected = connect(connection, environment).await?;
            let result = run_charts(&connected.state, &file, out).await;
            connected.finish(connection, result)
        }
        Command::Introspect { schema } => {
            let connected = connect(connection, environment).await?;
            let schema = schema.as_deref().unwrap_or(&connected.schema);
            let result = introspect(&connected.state, schema, out).await;
            connected.finish(connection, result)
        }
    }
}

/// A database connection and the registry its metrics are recorded in.
struct Connected {
    state: State,
    schema: String,
    registry: prometheus::Registry,
}

impl Connected {
    /// Print the metrics to stderr when asked to, whether or not the command succeeded.
    fn finish(self, connection: &ConnectionArgs, result: anyhow::Result<()>) -> anyhow::Result<()> {
        if connection.metrics {
            write_metrics(&self.registry, &mut std::io::stderr())?;
        }
        result
    }
}

/// Connect to the database, with metrics recorded in a fresh registry.
async fn connect(
    connection: &ConnectionArgs,
    environment: impl Environment,
) -> anyhow::Result<Connected> {
    let configuration = state::make_configuration(connection, environment).await?;
    let mut registry = prometheus::Registry::new();
    let state = state::create_state(&configuration, &mut registry).await?;
    Ok(Connected {
        state,
        schema: configuration.schema,
        registry,
    })
}

/// Write every metric in the registry in the Prometheus text format.
pub fn write_metrics(registry: &prometheus::Registry, out: &mut impl Write) -> anyhow::Result<()> {
    let metrics = prometheus::TextEncoder::new().encode_to_string(&registry.gather())?;
    write!(out, "{metrics}")?;
    Ok(())
}

/// Read the charts in a file and build the query for each.
async fn build_queries(file: &Path) -> anyhow::Result<Vec<(ChartSpec, sql::string::SQL)>> {
    let charts = read_chart_document(file).await?;
    charts
        .into_iter()
        .enumerate()
        .map(|(index, mut chart)| -> anyhow::Result<_> {
            let query = translation::to_sql(&mut chart)
                .with_context(|| format!("chart {index} in {}", file.display()))?;
            Ok((chart, query))
        })
        .collect()
}

pub async fn validate(file: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let mut chart = read_chart_config(file).await?;
    validate_and_normalize(&mut chart)
        .with_context(|| format!("invalid chart configuration in {}", file.display()))?;
    writeln!(out, "{}", chart_config_to_string(&chart)?)?;
    Ok(())
}

pub async fn build(file: &Path, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let queries = build_queries(file).await?;
    for (index, (chart, query)) in queries.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        writeln!(out, "-- {}", chart.title)?;
        if pretty {
            writeln!(out, "{}", format_sql(&query.sql))?;
        } else {
            writeln!(out, "{}", query.sql)?;
        }
        for (position, param) in query.params.iter().enumerate() {
            writeln!(out, "-- ${} = {param}", position + 1)?;
        }
    }
    Ok(())
}

pub async fn explain(state: &State, file: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    for (chart, query) in build_queries(file).await? {
        let (pretty, plan) = execution::explain(&state.pool, &state.metrics, &query)
            .await
            .with_context(|| format!("unable to explain '{}'", chart.title))?;
        writeln!(out, "-- {}\n{pretty}\n\n{plan}\n", chart.title)?;
    }
    Ok(())
}

async fn run_charts(state: &State, file: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let mut results = vec![];
    for (chart, query) in build_queries(file).await? {
        let rows = execution::execute(&state.pool, &state.metrics, &query)
            .await
            .with_context(|| format!("unable to run '{}'", chart.title))?;
        results.push(serde_json::json!({ "title": chart.title, "rows": rows }));
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
    Ok(())
}

pub async fn introspect(state: &State, schema: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let metadata = introspection::introspect(&state.pool, &state.metrics, schema)
        .await
        .with_context(|| format!("unable to introspect schema {schema}"))?;
    writeln!(out, "{}", serde_json::to_string_pretty(&metadata)?)?;
    Ok(())
}

pub async fn schema(output: Option<&Path>, out: &mut impl Write) -> anyhow::Result<()> {
    match output {
        Some(path) => write_chart_config_schema(path).await?,
        None => writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&chart_config_schema())?
        )?,
    }
    Ok(())
}

fn format_sql(query: &str) -> String {
    sqlformat::format(
        query,
        &sqlformat::QueryParams::None,
        sqlformat::FormatOptions::default(),
    )
}
