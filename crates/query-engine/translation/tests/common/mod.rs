use chart_query_configuration::{ChartSpec, FilterSpec};
use query_engine_sql::sql;
use query_engine_translation::translation;

/// Translate a golden chart configuration and render the query for a snapshot.
pub fn test_translation(testname: &str) -> anyhow::Result<String> {
    tests_common::query::init_logging();
    let mut chart = tests_common::goldenfiles::load_golden_chart(testname)?;
    let query = translation::to_sql(&mut chart)?;
    Ok(tests_common::query::render_query(&query))
}

/// A valid chart over a single table, with the given filters.
pub fn chart_with_filters(filters: Vec<FilterSpec>) -> ChartSpec {
    let mut chart: ChartSpec = serde_json::from_value(serde_json::json!({
        "chart_type": "bar",
        "title": "Orders",
        "tables": [{ "name": "orders" }],
        "x_axis": { "column": "status" },
        "y_axis": [{ "column": "amount" }]
    }))
    .unwrap();
    chart.filters = filters;
    chart
}

/// Translate filters alone, returning the WHERE predicates and their parameters.
pub fn translate_where(
    filters: &[FilterSpec],
) -> Result<sql::string::SQL, translation::error::Error> {
    let predicates = translation::query::filtering::translate_filters(filters)?;
    let mut query = sql::string::SQL::new();
    sql::ast::Where(predicates).to_sql(&mut query);
    Ok(query)
}
