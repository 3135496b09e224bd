//! Translate the chart axes into the select list.

use chart_query_configuration::{AxisSpec, ChartSpec};
use query_engine_sql::sql;

pub const X_VALUE: &str = "x_value";

/// The output column name of the Y series at `index`.
pub fn y_value_name(index: usize) -> String {
    format!("y_value_{index}")
}

/// The X axis first, then each Y series. Output columns are named by position;
/// an axis alias never reaches the SQL.
pub fn translate_fields(chart: &ChartSpec) -> Vec<(sql::ast::ColumnAlias, sql::ast::Expression)> {
    std::iter::once((
        sql::ast::ColumnAlias(X_VALUE.to_string()),
        translate_axis(&chart.x_axis),
    ))
    .chain(chart.y_axis.iter().enumerate().map(|(index, axis)| {
        (
            sql::ast::ColumnAlias(y_value_name(index)),
            translate_axis(axis),
        )
    }))
    .collect()
}

fn translate_axis(axis: &AxisSpec) -> sql::ast::Expression {
    let column = sql::helpers::raw(&axis.column);
    if axis.aggregation.is_empty() {
        column
    } else {
        sql::ast::Expression::FunctionCall {
            function: translate_aggregation(&axis.aggregation),
            args: vec![column],
        }
    }
}

fn translate_aggregation(aggregation: &str) -> sql::ast::Function {
    match aggregation {
        "SUM" => sql::ast::Function::Sum,
        "COUNT" => sql::ast::Function::Count,
        "AVG" => sql::ast::Function::Avg,
        "MIN" => sql::ast::Function::Min,
        "MAX" => sql::ast::Function::Max,
        other => sql::ast::Function::Unknown(other.to_string()),
    }
}
