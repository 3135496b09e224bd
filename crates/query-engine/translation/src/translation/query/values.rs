//! Handle the translation of literal values.

use chart_query_configuration::Scalar;
use query_engine_sql::sql;

/// A literal always becomes a bound parameter.
pub fn translate_scalar(scalar: &Scalar) -> sql::ast::Expression {
    sql::ast::Expression::Param(translate_param(scalar))
}

pub fn translate_param(scalar: &Scalar) -> sql::string::Param {
    match scalar {
        Scalar::String(s) => sql::string::Param::String(s.clone()),
        Scalar::Number(n) => sql::string::Param::Number(n.clone()),
        Scalar::Bool(b) => sql::string::Param::Bool(*b),
    }
}

/// Booleans, and strings spelling "true" or "false" in any case.
pub fn boolean_literal(scalar: &Scalar) -> Option<bool> {
    match scalar {
        Scalar::Bool(b) => Some(*b),
        Scalar::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Scalar::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        Scalar::String(_) | Scalar::Number(_) => None,
    }
}
