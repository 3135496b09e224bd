//! Translate the FROM target and its joins.

use chart_query_configuration::{JoinSpec, TableSpec};
use query_engine_sql::sql;

/// The first table is the FROM target.
pub fn translate_from(table: &TableSpec) -> sql::ast::From {
    sql::ast::From {
        table: sql::ast::TableName(table.name.clone()),
        alias: table.alias.clone().map(sql::ast::TableAlias),
    }
}

/// The joins listed under the FROM target, in order.
pub fn translate_joins(table: &TableSpec) -> Vec<sql::ast::Join> {
    table.joins.iter().map(translate_join).collect()
}

fn translate_join(join: &JoinSpec) -> sql::ast::Join {
    sql::ast::Join {
        kind: match join.join_type.as_str() {
            "INNER" => sql::ast::JoinKind::Inner,
            "LEFT" => sql::ast::JoinKind::Left,
            "RIGHT" => sql::ast::JoinKind::Right,
            "FULL" => sql::ast::JoinKind::Full,
            other => sql::ast::JoinKind::Other(other.to_string()),
        },
        table: sql::ast::TableName(join.table.clone()),
        alias: join.alias.clone().map(sql::ast::TableAlias),
        on: sql::helpers::raw(&join.condition),
    }
}
