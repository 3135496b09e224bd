//! Translate the ORDER BY clause.

use chart_query_configuration::{OrderDirection, OrderSpec};
use query_engine_sql::sql;

pub fn translate_order_by(order_by: &[OrderSpec]) -> sql::ast::OrderBy {
    sql::ast::OrderBy {
        elements: order_by
            .iter()
            .map(|order| sql::ast::OrderByElement {
                target: sql::helpers::raw(&order.column),
                direction: order.direction.map(|direction| match direction {
                    OrderDirection::Asc => sql::ast::OrderByDirection::Asc,
                    OrderDirection::Desc => sql::ast::OrderByDirection::Desc,
                }),
            })
            .collect(),
    }
}
