//! Filters: structured predicates over a column, or raw SQL with its own bound values.

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single WHERE predicate.
///
/// In JSON a filter is written as `{"column", "operator", "value" | "values"}`, or as
/// `{"raw", "raw_values"}`. A non-empty `raw` makes it a [`FilterSpec::Raw`], and then
/// every other field is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "FilterRepr", into = "FilterRepr")]
pub enum FilterSpec {
    Predicate(PredicateFilter),
    Raw(RawFilter),
}

/// `column operator value`
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateFilter {
    pub column: String,
    /// One of the [`Operator`]s, in any case.
    pub operator: String,
    pub value: FilterValue,
}

/// SQL text emitted as written, with the values its placeholders refer to.
///
/// Placeholders are numbered across the whole query: a raw filter that follows filters
/// binding `k` values starts at `$k+1`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFilter {
    pub sql: String,
    pub values: Vec<Scalar>,
}

/// What a predicate compares against.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// No `value` or `values` given.
    Absent,
    /// An explicit `"value": null`.
    Null,
    Scalar(Scalar),
    /// The `values` array, used by IN, NOT IN and BETWEEN. Entries may be NULL.
    List(Vec<Option<Scalar>>),
}

/// A literal value. Literals are always bound as parameters, never inlined.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl FilterSpec {
    pub fn predicate(column: &str, operator: &str, value: FilterValue) -> Self {
        FilterSpec::Predicate(PredicateFilter {
            column: column.to_string(),
            operator: operator.to_string(),
            value,
        })
    }

    pub fn raw(sql: &str, values: Vec<Scalar>) -> Self {
        FilterSpec::Raw(RawFilter {
            sql: sql.to_string(),
            values,
        })
    }
}

impl FilterValue {
    /// The single value compared against; `None` stands for SQL NULL.
    pub fn scalar(&self) -> Option<&Scalar> {
        match self {
            FilterValue::Scalar(scalar) => Some(scalar),
            FilterValue::Absent | FilterValue::Null | FilterValue::List(_) => None,
        }
    }

    /// The `values` array, empty unless this is a list.
    pub fn list(&self) -> &[Option<Scalar>] {
        match self {
            FilterValue::List(values) => values,
            FilterValue::Absent | FilterValue::Null | FilterValue::Scalar(_) => &[],
        }
    }

    /// Whether the filter supplies something to compare against, NULL included.
    pub fn is_supplied(&self) -> bool {
        match self {
            FilterValue::Absent => false,
            FilterValue::Null | FilterValue::Scalar(_) => true,
            FilterValue::List(values) => !values.is_empty(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// The operators a structured filter may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum Operator {
    Equal,
    NotEqual,
    LessGreater,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    In,
    NotIn,
    Between,
    IsNull,
    IsNotNull,
    Like,
    ILike,
    NotLike,
    NotILike,
}

impl Operator {
    /// Case-insensitive lookup.
    pub fn parse(operator: &str) -> Option<Operator> {
        let operator = operator.to_uppercase();
        enum_iterator::all::<Operator>().find(|candidate| candidate.as_str() == operator)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessGreater => "<>",
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Between => "BETWEEN",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
            Operator::Like => "LIKE",
            Operator::ILike => "ILIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::NotILike => "NOT ILIKE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The JSON shape of a filter.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[schemars(rename = "FilterSpec")]
struct FilterRepr {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    column: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    operator: String,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<Scalar>")]
    value: Option<Option<Scalar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    values: Option<Vec<Option<Scalar>>>,
    #[serde(default, alias = "Raw", skip_serializing_if = "String::is_empty")]
    raw: String,
    #[serde(default, alias = "RawValues", skip_serializing_if = "Vec::is_empty")]
    raw_values: Vec<Scalar>,
}

/// Tell a `null` value apart from a missing one.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<Scalar>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer).map(Some)
}

impl From<FilterRepr> for FilterSpec {
    fn from(repr: FilterRepr) -> Self {
        if !repr.raw.is_empty() {
            return FilterSpec::Raw(RawFilter {
                sql: repr.raw,
                values: repr.raw_values,
            });
        }
        let value = match (repr.values, repr.value) {
            (Some(values), _) if !values.is_empty() => FilterValue::List(values),
            (_, Some(Some(scalar))) => FilterValue::Scalar(scalar),
            (_, Some(None)) => FilterValue::Null,
            (Some(values), None) => FilterValue::List(values),
            (None, None) => FilterValue::Absent,
        };
        FilterSpec::Predicate(PredicateFilter {
            column: repr.column,
            operator: repr.operator,
            value,
        })
    }
}

impl From<FilterSpec> for FilterRepr {
    fn from(filter: FilterSpec) -> Self {
        match filter {
            FilterSpec::Raw(RawFilter { sql, values }) => FilterRepr {
                raw: sql,
                raw_values: values,
                ..FilterRepr::default()
            },
            FilterSpec::Predicate(PredicateFilter {
                column,
                operator,
                value,
            }) => {
                let (value, values) = match value {
                    FilterValue::Absent => (None, None),
                    FilterValue::Null => (Some(None), None),
                    FilterValue::Scalar(scalar) => (Some(Some(scalar)), None),
                    FilterValue::List(values) => (None, Some(values)),
                };
                FilterRepr {
                    column,
                    operator,
                    value,
                    values,
                    ..FilterRepr::default()
                }
            }
        }
    }
}

impl JsonSchema for FilterSpec {
    fn schema_name() -> String {
        "FilterSpec".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        FilterRepr::json_schema(gen)
    }
}
