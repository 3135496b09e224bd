//! Handle filtering/where clauses translation.

use chart_query_configuration::{
    FilterSpec, FilterValue, Operator, PredicateFilter, RawFilter, Scalar,
};
use query_engine_sql::sql;
use query_engine_sql::sql::ast::{BinaryArrayOperator, Expression, UnaryOperator};

use super::values;
use crate::translation::error::Error;

/// Translate every filter into one predicate of the WHERE conjunction.
pub fn translate_filters(filters: &[FilterSpec]) -> Result<Vec<Expression>, Error> {
    filters.iter().map(translate_filter).collect()
}

pub fn translate_filter(filter: &FilterSpec) -> Result<Expression, Error> {
    match filter {
        FilterSpec::Raw(raw) => Ok(translate_raw(raw)),
        FilterSpec::Predicate(predicate) => translate_predicate(predicate),
    }
}

fn translate_raw(raw: &RawFilter) -> Expression {
    Expression::RawPredicate {
        sql: raw.sql.clone(),
        params: raw.values.iter().map(values::translate_param).collect(),
    }
}

fn translate_predicate(filter: &PredicateFilter) -> Result<Expression, Error> {
    let column = sql::helpers::raw(&filter.column);

    match Operator::parse(&filter.operator) {
        Some(Operator::Equal) => Ok(translate_equality(filter, column, true)),
        Some(Operator::NotEqual | Operator::LessGreater) => {
            Ok(translate_equality(filter, column, false))
        }
        Some(
            Operator::Less | Operator::LessOrEqual | Operator::Greater | Operator::GreaterOrEqual,
        ) => match filter.value.scalar() {
            None => Err(Error::NullComparison {
                operator: filter.operator.clone(),
                column: filter.column.clone(),
            }),
            Some(value) => Ok(compare(filter, column, value)),
        },
        // pattern matches, and operators we do not know, treat a missing value as NULL
        Some(Operator::Like | Operator::ILike | Operator::NotLike | Operator::NotILike) | None => {
            Ok(match filter.value.scalar() {
                None => sql::helpers::is_null(column),
                Some(value) => compare(filter, column, value),
            })
        }
        Some(Operator::In) => Ok(translate_membership(
            filter,
            column,
            BinaryArrayOperator::In,
        )),
        Some(Operator::NotIn) => Ok(translate_membership(
            filter,
            column,
            BinaryArrayOperator::NotIn,
        )),
        Some(Operator::Between) => translate_between(filter, column),
        Some(Operator::IsNull) => Ok(sql::helpers::is_null(column)),
        Some(Operator::IsNotNull) => Ok(sql::helpers::is_not_null(column)),
    }
}

/// `column <operator as written> $n`
fn compare(filter: &PredicateFilter, column: Expression, value: &Scalar) -> Expression {
    Expression::BinaryOperation {
        left: Box::new(column),
        operator: sql::ast::BinaryOperator(filter.operator.clone()),
        right: Box::new(values::translate_scalar(value)),
    }
}

/// `=`, `!=` and `<>`. Comparing with NULL or with a boolean literal uses an `IS` test,
/// which binds nothing.
fn translate_equality(filter: &PredicateFilter, column: Expression, equal: bool) -> Expression {
    match filter.value.scalar() {
        None if equal => sql::helpers::is_null(column),
        None => sql::helpers::is_not_null(column),
        Some(value) => match values::boolean_literal(value) {
            Some(literal) => {
                let operator = match (equal, literal) {
                    (true, true) => UnaryOperator::IsTrue,
                    (true, false) => UnaryOperator::IsFalse,
                    (false, true) => UnaryOperator::IsNotTrue,
                    (false, false) => UnaryOperator::IsNotFalse,
                };
                sql::helpers::unary(column, operator)
            }
            None => compare(filter, column, value),
        },
    }
}

/// IN and NOT IN. Only the non-NULL values are bound; NULLs become an `IS [NOT] NULL` test.
/// A single `value` counts as a one-element list.
///
/// | values      | IN                              | NOT IN                              |
/// |-------------|---------------------------------|-------------------------------------|
/// | no NULLs    | `c IN ($1, $2)`                 | `c NOT IN ($1, $2)`                 |
/// | only NULLs  | `c IS NULL`                     | `c IS NOT NULL`                     |
/// | mixed       | `(c IN ($1, $2) OR c IS NULL)`  | `(c NOT IN ($1, $2) OR c IS NULL)`  |
fn translate_membership(
    filter: &PredicateFilter,
    column: Expression,
    operator: BinaryArrayOperator,
) -> Expression {
    let list: Vec<Option<&Scalar>> = match &filter.value {
        FilterValue::Scalar(value) => vec![Some(value)],
        FilterValue::Null => vec![None],
        value => value.list().iter().map(Option::as_ref).collect(),
    };
    let present: Vec<&Scalar> = list.iter().flatten().copied().collect();
    let has_null = present.len() < list.len();

    let membership = |column: Expression| Expression::BinaryArrayOperation {
        left: Box::new(column),
        operator,
        right: present
            .iter()
            .map(|value| values::translate_scalar(value))
            .collect(),
    };

    if !has_null {
        membership(column)
    } else if present.is_empty() {
        match operator {
            BinaryArrayOperator::In => sql::helpers::is_null(column),
            BinaryArrayOperator::NotIn => sql::helpers::is_not_null(column),
        }
    } else {
        sql::helpers::or(membership(column.clone()), sql::helpers::is_null(column))
    }
}

/// `column BETWEEN $n AND $n+1`. Both bounds must be present and non-NULL.
fn translate_between(filter: &PredicateFilter, column: Expression) -> Result<Expression, Error> {
    let list = filter.value.list();
    let bound = |index: usize| list.get(index).and_then(Option::as_ref);

    match (bound(0), bound(1)) {
        (Some(low), Some(high)) => Ok(Expression::Between {
            expression: Box::new(column),
            low: Box::new(values::translate_scalar(low)),
            high: Box::new(values::translate_scalar(high)),
        }),
        _ => Err(Error::NullInBetween {
            column: filter.column.clone(),
        }),
    }
}
