//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;
use super::string::SQL;

// Empty clauses //

/// An empty `WHERE` clause.
pub fn empty_where() -> Where {
    Where(vec![])
}

/// An empty `GROUP BY` clause.
pub fn empty_group_by() -> GroupBy {
    GroupBy { elements: vec![] }
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// An empty `LIMIT` clause.
pub fn empty_limit() -> Limit {
    Limit { limit: None }
}

/// Build a simple select with a select list and the rest are empty.
pub fn simple_select(select_list: Vec<(ColumnAlias, Expression)>) -> Select {
    Select {
        select_list: SelectList(select_list),
        from: None,
        joins: vec![],
        where_: empty_where(),
        group_by: empty_group_by(),
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}

// Expressions //

/// Trusted SQL text.
pub fn raw(text: &str) -> Expression {
    Expression::Raw(text.to_string())
}

/// `<expression> <operator>`
pub fn unary(expression: Expression, operator: UnaryOperator) -> Expression {
    Expression::UnaryOperation {
        expression: Box::new(expression),
        operator,
    }
}

/// `<expression> IS NULL`
pub fn is_null(expression: Expression) -> Expression {
    unary(expression, UnaryOperator::IsNull)
}

/// `<expression> IS NOT NULL`
pub fn is_not_null(expression: Expression) -> Expression {
    unary(expression, UnaryOperator::IsNotNull)
}

/// `(<left> OR <right>)`
pub fn or(left: Expression, right: Expression) -> Expression {
    Expression::Or {
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Convert a select to its SQL text and parameters.
pub fn select_to_sql(select: &Select) -> SQL {
    let mut sql = SQL::new();
    select.to_sql(&mut sql);
    sql
}
