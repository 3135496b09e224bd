//! The chart configuration model: what data a chart needs, described declaratively.

use std::fmt;
use std::str::FromStr;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::filter::FilterSpec;

/// A chart's data requirements. Build one in code or parse one with
/// [`crate::parse_chart_config`], then pass it through
/// [`crate::validate_and_normalize`] before translating it to SQL.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct ChartSpec {
    /// One of "line", "bar", "pie", "scatter", "area" or "histogram".
    #[serde(default)]
    pub chart_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The first table is the FROM target; only its joins are emitted.
    #[serde(default)]
    pub tables: Vec<TableSpec>,
    #[serde(default)]
    pub x_axis: AxisSpec,
    /// One output column per series, named `y_value_<index>`.
    #[serde(default)]
    pub y_axis: Vec<AxisSpec>,
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    #[serde(default)]
    pub options: ChartOptions,
    /// Zero means no limit.
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub order_by: Vec<OrderSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct TableSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<JoinSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct JoinSpec {
    #[serde(default)]
    pub table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// "INNER", "LEFT", "RIGHT" or "FULL". Empty until normalized to "INNER".
    #[serde(default, rename = "type")]
    pub join_type: String,
    /// A raw SQL predicate such as `orders.user_id = users.id`.
    #[serde(default)]
    pub condition: String,
}

/// A column or expression plotted on an axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct AxisSpec {
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub label: String,
    /// "SUM", "COUNT", "AVG", "MIN" or "MAX". Empty for no aggregation.
    #[serde(default)]
    pub aggregation: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Descriptive only: output columns are always named by position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct OrderSpec {
    #[serde(default)]
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<OrderDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum OrderDirection {
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

/// Presentation settings. They never affect the generated SQL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ChartOptions {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub theme: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub stacked: bool,
    #[serde(default)]
    pub show_legend: bool,
    #[serde(default)]
    pub show_grid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    /// "day", "week", "month" or "year".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// The supported kinds of chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
    Area,
    Histogram,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Area => "area",
            ChartKind::Histogram => "histogram",
        }
    }
}

/// The join keywords a join may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::Full => "FULL",
        }
    }
}

/// The aggregation functions a Y-axis may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum Aggregation {
    Sum,
    Count,
    Avg,
    Min,
    Max,
}

impl Aggregation {
    pub fn as_str(self) -> &'static str {
        match self {
            Aggregation::Sum => "SUM",
            Aggregation::Count => "COUNT",
            Aggregation::Avg => "AVG",
            Aggregation::Min => "MIN",
            Aggregation::Max => "MAX",
        }
    }
}

/// The text did not name a member of the enumeration. Matching is exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

macro_rules! impl_exact_names {
    ($($t:ty),*) => {
        $(
            impl FromStr for $t {
                type Err = UnknownName;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    enum_iterator::all::<$t>()
                        .find(|candidate| candidate.as_str() == s)
                        .ok_or_else(|| UnknownName(s.to_string()))
                }
            }

            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )*
    };
}

impl_exact_names!(ChartKind, JoinKind, Aggregation);

/// Comma-separated list of every member, for error messages.
pub fn list_all<T: Sequence + fmt::Display>() -> String {
    enum_iterator::all::<T>()
        .map(|member| member.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
