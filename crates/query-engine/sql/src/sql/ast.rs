//! Type definitions of a SQL AST representation.

use super::string::Param;

/// A SELECT clause
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub select_list: SelectList,
    pub from: Option<From>,
    pub joins: Vec<Join>,
    pub where_: Where,
    pub group_by: GroupBy,
    pub order_by: OrderBy,
    pub limit: Limit,
}

/// A select list: each expression is emitted with its positional output name.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectList(pub Vec<(ColumnAlias, Expression)>);

/// A FROM clause
#[derive(Debug, Clone, PartialEq)]
pub struct From {
    pub table: TableName,
    pub alias: Option<TableAlias>,
}

/// A JOIN clause
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: TableName,
    pub alias: Option<TableAlias>,
    pub on: Expression,
}

/// The kind of a JOIN
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    /// A join keyword we do not recognise, emitted as written.
    Other(String),
}

/// A WHERE clause, the conjunction of its predicates.
/// An empty list emits no WHERE clause at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Where(pub Vec<Expression>);

/// A GROUP BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    pub elements: Vec<Expression>,
}

/// An ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

/// A single element in an ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByElement {
    pub target: Expression,
    pub direction: Option<OrderByDirection>,
}

/// A direction for a single ORDER BY element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

/// A LIMIT clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    pub limit: Option<u32>,
}

/// A scalar expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Caller-supplied SQL text: a column, an expression or a join condition.
    /// It is trusted and emitted verbatim, never parameterized.
    Raw(String),
    /// A value bound as the next positional parameter.
    Param(Param),
    BinaryOperation {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    BinaryArrayOperation {
        left: Box<Expression>,
        operator: BinaryArrayOperator,
        right: Vec<Expression>,
    },
    UnaryOperation {
        expression: Box<Expression>,
        operator: UnaryOperator,
    },
    Between {
        expression: Box<Expression>,
        low: Box<Expression>,
        high: Box<Expression>,
    },
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    FunctionCall {
        function: Function,
        args: Vec<Expression>,
    },
    /// A predicate written by the user together with the values its placeholders refer to.
    RawPredicate { sql: String, params: Vec<Param> },
}

/// A comparison operator, emitted exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOperator(pub String);

/// An operator whose right-hand side is a parenthesized list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryArrayOperator {
    In,
    NotIn,
}

/// Postfix `IS ...` tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    IsNull,
    IsNotNull,
    IsTrue,
    IsFalse,
    IsNotTrue,
    IsNotFalse,
}

/// A scalar function call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Function {
    Sum,
    Count,
    Avg,
    Min,
    Max,
    Unknown(String),
}

/// A database table's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(pub String);

/// A table alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAlias(pub String);

/// An output column name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAlias(pub String);
