//! Lower a validated chart configuration into a SQL AST and render it.

pub mod fields;
pub mod filtering;
pub mod joins;
pub mod sorting;
pub mod values;

use chart_query_configuration::ChartSpec;
use query_engine_sql::sql;

use super::error::Error;

/// Translate a chart configuration into SQL text and its bound parameters.
///
/// The chart must already have passed validation: nothing is checked here beyond the
/// NULL uses that only show up in filter values.
pub fn translate(chart: &ChartSpec) -> Result<sql::string::SQL, Error> {
    let select = translate_select(chart)?;
    Ok(sql::helpers::select_to_sql(&select))
}

/// Build the SELECT for a chart.
pub fn translate_select(chart: &ChartSpec) -> Result<sql::ast::Select, Error> {
    let mut select = sql::helpers::simple_select(fields::translate_fields(chart));

    if let Some(table) = chart.tables.first() {
        select.from = Some(joins::translate_from(table));
        select.joins = joins::translate_joins(table);
    }

    select.where_ = sql::ast::Where(filtering::translate_filters(&chart.filters)?);

    select.group_by = sql::ast::GroupBy {
        elements: chart
            .group_by
            .iter()
            .map(|expression| sql::helpers::raw(expression))
            .collect(),
    };

    select.order_by = sorting::translate_order_by(&chart.order_by);

    select.limit = sql::ast::Limit {
        limit: (chart.limit > 0).then_some(chart.limit),
    };

    Ok(select)
}
