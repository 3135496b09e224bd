//! Execute a chart query against the database.

use std::collections::BTreeMap;

use query_engine_sql::sql;
use query_engine_sql::sql::string::Param;
use sqlx::{Executor, Row, Statement};
use tracing::{info_span, Instrument};

use crate::error::{Error, QueryError};
use crate::metrics;
use crate::rows::{self, ChartDataRow};

const ROW_ALIAS: &str = "chart_rows";

/// Execute a query against postgres, returning one chart row per result row.
pub async fn execute(
    pool: &sqlx::PgPool,
    metrics: &metrics::Metrics,
    query: &sql::string::SQL,
) -> Result<Vec<ChartDataRow>, Error> {
    tracing::info!(generated_sql = query.sql, params = ?&query.params);

    let timer = metrics.query_duration_seconds.start_timer();
    let result = fetch_rows(pool, query)
        .instrument(info_span!("Execute chart query"))
        .await;
    timer.observe_duration();

    match result {
        Ok(rows) => {
            metrics.query_total.inc();
            Ok(rows)
        }
        Err(err) => {
            metrics.query_failure_total.inc();
            tracing::error!(error = %err, "chart query failed");
            Err(err)
        }
    }
}

async fn fetch_rows(
    pool: &sqlx::PgPool,
    query: &sql::string::SQL,
) -> Result<Vec<ChartDataRow>, Error> {
    let query = row_to_json_query(&cast_string_params(pool, query).await?);
    let rows = build_query_with_params(&query)?.fetch_all(pool).await?;
    rows.iter()
        .map(|row| -> Result<ChartDataRow, Error> {
            let value: serde_json::Value = row.try_get(0)?;
            Ok(rows::materialize(value)?)
        })
        .collect()
}

/// Convert a query to an EXPLAIN query and execute it against postgres.
/// Returns the pretty-printed query and the plan.
pub async fn explain(
    pool: &sqlx::PgPool,
    metrics: &metrics::Metrics,
    query: &sql::string::SQL,
) -> Result<(String, String), Error> {
    tracing::info!(generated_sql = query.sql, params = ?&query.params);

    let explain_query = explain_query(&cast_string_params(pool, query).await?);
    let rows = build_query_with_params(&explain_query)?
        .fetch_all(pool)
        .instrument(info_span!("Explain chart query"))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "explain failed");
            err
        })?;

    let mut results: Vec<String> = vec![];
    for row in rows {
        results.push(row.try_get(0)?);
    }

    let pretty = sqlformat::format(
        &query.sql,
        &sqlformat::QueryParams::None,
        sqlformat::FormatOptions::default(),
    );

    metrics.explain_total.inc();
    Ok((pretty, results.join("\n")))
}

/// Wrap a query so that each result row comes back as a single JSON object.
pub fn row_to_json_query(query: &sql::string::SQL) -> sql::string::SQL {
    sql::string::SQL {
        sql: format!(
            "SELECT row_to_json(\"{ROW_ALIAS}\") FROM ({}) AS \"{ROW_ALIAS}\"",
            query.sql
        ),
        ..query.clone()
    }
}

pub fn explain_query(query: &sql::string::SQL) -> sql::string::SQL {
    sql::string::SQL {
        sql: format!("EXPLAIN {}", query.sql),
        ..query.clone()
    }
}

/// String parameters are sent as `TEXT`, which postgres will not compare with a
/// timestamp or an integer column. Prepare the query to learn the type postgres
/// infers for each placeholder, and cast string parameters to it through text.
async fn cast_string_params(
    pool: &sqlx::PgPool,
    query: &sql::string::SQL,
) -> Result<sql::string::SQL, Error> {
    if !query
        .params
        .iter()
        .any(|param| matches!(param, Param::String(_)))
    {
        return Ok(query.clone());
    }

    let statement = pool.prepare(query.sql.as_str()).await?;
    let Some(sqlx::Either::Left(types)) = statement.parameters() else {
        return Ok(query.clone());
    };

    let casts: BTreeMap<usize, String> = query
        .params
        .iter()
        .zip(types)
        .enumerate()
        .filter(|(_, (param, type_info))| {
            matches!(param, Param::String(_))
                && !<String as sqlx::Type<sqlx::Postgres>>::compatible(type_info)
        })
        .map(|(index, (_, type_info))| (index + 1, type_info.to_string()))
        .collect();

    if casts.is_empty() {
        return Ok(query.clone());
    }
    tracing::debug!(?casts, "casting string parameters");

    Ok(sql::string::SQL {
        sql: cast_placeholders(&query.sql, &casts),
        ..query.clone()
    })
}

/// Rewrite each `$n` listed in `casts` as `($n::text::<type>)`.
fn cast_placeholders(query: &str, casts: &BTreeMap<usize, String>) -> String {
    let mut output = String::with_capacity(query.len());
    let mut rest = query;
    while let Some(start) = rest.find('$') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let digits = after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len());
        let placeholder = &rest[start..=start + digits];
        match after[..digits]
            .parse::<usize>()
            .ok()
            .and_then(|index| casts.get(&index))
        {
            Some(type_name) => output.push_str(&format!("({placeholder}::text::{type_name})")),
            None => output.push_str(placeholder),
        }
        rest = &after[digits..];
    }
    output.push_str(rest);
    output
}

/// Create a SQLx query based on our SQL query and bind our parameters to it.
fn build_query_with_params(
    query: &sql::string::SQL,
) -> Result<sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>, Error> {
    let sqlx_query = sqlx::query(query.sql.as_str());

    query
        .params
        .iter()
        .try_fold(sqlx_query, |sqlx_query, param| match param {
            Param::String(s) => Ok(sqlx_query.bind(s)),
            Param::Bool(b) => Ok(sqlx_query.bind(*b)),
            Param::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(sqlx_query.bind(i)),
                (None, Some(f)) => Ok(sqlx_query.bind(f)),
                (None, None) => Err(Error::Query(QueryError::UnrepresentableNumber(n.clone()))),
            },
        })
}
