//! Check a chart configuration's structure and fill in its defaults.

use std::fmt;

use thiserror::Error;

use crate::chart::{list_all, Aggregation, ChartKind, ChartSpec, JoinKind, OrderDirection};
use crate::filter::{FilterSpec, Operator, PredicateFilter};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 400;
pub const DEFAULT_THEME: &str = "light";

/// A step in the path to an offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOrIndex {
    Key(&'static str),
    Index(usize),
}

/// A path such as `tables[0].joins[1].condition`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(pub Vec<KeyOrIndex>);

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let FieldPath(steps) = self;
        for (index, step) in steps.iter().enumerate() {
            match step {
                KeyOrIndex::Key(key) if index == 0 => write!(f, "{key}")?,
                KeyOrIndex::Key(key) => write!(f, ".{key}")?,
                KeyOrIndex::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

/// The first structural problem found in a chart configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("chart_type is required")]
    MissingChartType,
    #[error("invalid chart_type: {chart_type}. Must be one of: {}", list_all::<ChartKind>())]
    InvalidChartType { chart_type: String },
    #[error("title is required")]
    MissingTitle,
    #[error("at least one table is required")]
    NoTables,
    #[error("at least one y-axis is required")]
    NoYAxis,
    #[error("x_axis column is required")]
    MissingXAxisColumn,
    #[error("table name is required at index {table_index}")]
    MissingTableName { table_index: usize },
    #[error("join table is required at table index {table_index}, join index {join_index}")]
    MissingJoinTable {
        table_index: usize,
        join_index: usize,
    },
    #[error("join condition is required at table index {table_index}, join index {join_index}")]
    MissingJoinCondition {
        table_index: usize,
        join_index: usize,
    },
    #[error("invalid join type '{join_type}' at table index {table_index}, join index {join_index}. Must be one of: {}", list_all::<JoinKind>())]
    InvalidJoinType {
        join_type: String,
        table_index: usize,
        join_index: usize,
    },
    #[error("y_axis column is required at index {index}")]
    MissingYAxisColumn { index: usize },
    #[error("invalid aggregation '{aggregation}' for y_axis at index {index}. Must be one of: {}", list_all::<Aggregation>())]
    InvalidAggregation { aggregation: String, index: usize },
    #[error("filter column is required at index {index}")]
    MissingFilterColumn { index: usize },
    #[error("filter operator is required at index {index}")]
    MissingFilterOperator { index: usize },
    #[error("invalid filter operator '{operator}' at index {index}. Must be one of: {}", list_all::<Operator>())]
    InvalidFilterOperator { operator: String, index: usize },
    #[error("IN operator requires a non-empty 'values' array at filter index {index}")]
    MissingInValues { index: usize },
    #[error("BETWEEN operator requires exactly 2 values at filter index {index}, got {count}")]
    BetweenArity { index: usize, count: usize },
    #[error("filter value is required for operator '{operator}' at index {index}")]
    MissingFilterValue { operator: String, index: usize },
}

impl ValidationError {
    /// The field this error is about.
    pub fn path(&self) -> FieldPath {
        use KeyOrIndex::{Index, Key};
        let steps = match self {
            ValidationError::MissingChartType | ValidationError::InvalidChartType { .. } => {
                vec![Key("chart_type")]
            }
            ValidationError::MissingTitle => vec![Key("title")],
            ValidationError::NoTables => vec![Key("tables")],
            ValidationError::NoYAxis => vec![Key("y_axis")],
            ValidationError::MissingXAxisColumn => vec![Key("x_axis"), Key("column")],
            ValidationError::MissingTableName { table_index } => {
                vec![Key("tables"), Index(*table_index), Key("name")]
            }
            ValidationError::MissingJoinTable {
                table_index,
                join_index,
            } => join_path(*table_index, *join_index, "table"),
            ValidationError::MissingJoinCondition {
                table_index,
                join_index,
            } => join_path(*table_index, *join_index, "condition"),
            ValidationError::InvalidJoinType {
                table_index,
                join_index,
                ..
            } => join_path(*table_index, *join_index, "type"),
            ValidationError::MissingYAxisColumn { index } => {
                vec![Key("y_axis"), Index(*index), Key("column")]
            }
            ValidationError::InvalidAggregation { index, .. } => {
                vec![Key("y_axis"), Index(*index), Key("aggregation")]
            }
            ValidationError::MissingFilterColumn { index } => {
                vec![Key("filters"), Index(*index), Key("column")]
            }
            ValidationError::MissingFilterOperator { index }
            | ValidationError::InvalidFilterOperator { index, .. } => {
                vec![Key("filters"), Index(*index), Key("operator")]
            }
            ValidationError::MissingInValues { index }
            | ValidationError::BetweenArity { index, .. } => {
                vec![Key("filters"), Index(*index), Key("values")]
            }
            ValidationError::MissingFilterValue { index, .. } => {
                vec![Key("filters"), Index(*index), Key("value")]
            }
        };
        FieldPath(steps)
    }
}

fn join_path(table_index: usize, join_index: usize, field: &'static str) -> Vec<KeyOrIndex> {
    vec![
        KeyOrIndex::Key("tables"),
        KeyOrIndex::Index(table_index),
        KeyOrIndex::Key("joins"),
        KeyOrIndex::Index(join_index),
        KeyOrIndex::Key(field),
    ]
}

/// Validate a chart configuration and, if it is valid, apply defaults in place.
/// A rejected configuration is left untouched.
pub fn validate_and_normalize(chart: &mut ChartSpec) -> Result<(), ValidationError> {
    validate(chart)?;
    normalize(chart);
    Ok(())
}

/// Check every structural invariant, stopping at the first violation.
pub fn validate(chart: &ChartSpec) -> Result<(), ValidationError> {
    if chart.chart_type.is_empty() {
        return Err(ValidationError::MissingChartType);
    }
    if chart.chart_type.parse::<ChartKind>().is_err() {
        return Err(ValidationError::InvalidChartType {
            chart_type: chart.chart_type.clone(),
        });
    }
    if chart.title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if chart.tables.is_empty() {
        return Err(ValidationError::NoTables);
    }
    if chart.y_axis.is_empty() {
        return Err(ValidationError::NoYAxis);
    }
    if chart.x_axis.column.is_empty() {
        return Err(ValidationError::MissingXAxisColumn);
    }

    for (table_index, table) in chart.tables.iter().enumerate() {
        if table.name.is_empty() {
            return Err(ValidationError::MissingTableName { table_index });
        }
        for (join_index, join) in table.joins.iter().enumerate() {
            if join.table.is_empty() {
                return Err(ValidationError::MissingJoinTable {
                    table_index,
                    join_index,
                });
            }
            if join.condition.is_empty() {
                return Err(ValidationError::MissingJoinCondition {
                    table_index,
                    join_index,
                });
            }
            if !join.join_type.is_empty() && join.join_type.parse::<JoinKind>().is_err() {
                return Err(ValidationError::InvalidJoinType {
                    join_type: join.join_type.clone(),
                    table_index,
                    join_index,
                });
            }
        }
    }

    for (index, axis) in chart.y_axis.iter().enumerate() {
        if axis.column.is_empty() {
            return Err(ValidationError::MissingYAxisColumn { index });
        }
        if !axis.aggregation.is_empty() && axis.aggregation.parse::<Aggregation>().is_err() {
            return Err(ValidationError::InvalidAggregation {
                aggregation: axis.aggregation.clone(),
                index,
            });
        }
    }

    for (index, filter) in chart.filters.iter().enumerate() {
        match filter {
            // raw predicates are taken as written
            FilterSpec::Raw(_) => {}
            FilterSpec::Predicate(predicate) => validate_predicate(predicate, index)?,
        }
    }

    Ok(())
}

fn validate_predicate(filter: &PredicateFilter, index: usize) -> Result<(), ValidationError> {
    if filter.column.is_empty() {
        return Err(ValidationError::MissingFilterColumn { index });
    }
    if filter.operator.is_empty() {
        return Err(ValidationError::MissingFilterOperator { index });
    }
    let Some(operator) = Operator::parse(&filter.operator) else {
        return Err(ValidationError::InvalidFilterOperator {
            operator: filter.operator.clone(),
            index,
        });
    };

    match operator {
        Operator::In => {
            if filter.value.list().is_empty() {
                return Err(ValidationError::MissingInValues { index });
            }
        }
        Operator::Between => {
            let count = filter.value.list().len();
            if count != 2 {
                return Err(ValidationError::BetweenArity { index, count });
            }
        }
        Operator::IsNull | Operator::IsNotNull => {}
        _ => {
            if !filter.value.is_supplied() {
                return Err(ValidationError::MissingFilterValue {
                    operator: filter.operator.clone(),
                    index,
                });
            }
        }
    }

    Ok(())
}

/// Fill in the defaults: INNER joins, ascending order, and the visual option defaults.
pub fn normalize(chart: &mut ChartSpec) {
    for table in &mut chart.tables {
        for join in &mut table.joins {
            if join.join_type.is_empty() {
                join.join_type = JoinKind::Inner.to_string();
            }
        }
    }

    for order in &mut chart.order_by {
        order.direction.get_or_insert(OrderDirection::Asc);
    }

    if chart.options.width == 0 {
        chart.options.width = DEFAULT_WIDTH;
    }
    if chart.options.height == 0 {
        chart.options.height = DEFAULT_HEIGHT;
    }
    if chart.options.theme.is_empty() {
        chart.options.theme = DEFAULT_THEME.to_string();
    }
}
