//! Chart rows: one x value, then one named y value per series.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::QueryError;

/// A single cell of chart data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartValue {
    Null,
    Number(f64),
    Text(String),
}

impl From<serde_json::Value> for ChartValue {
    /// Numbers and booleans become numbers; arrays and objects keep their JSON text.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ChartValue::Null,
            serde_json::Value::Bool(b) => ChartValue::Number(if b { 1.0 } else { 0.0 }),
            serde_json::Value::Number(n) => n.as_f64().map_or(ChartValue::Null, ChartValue::Number),
            serde_json::Value::String(s) => ChartValue::Text(s),
            other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                ChartValue::Text(other.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataRow {
    pub x_value: ChartValue,
    /// One single-entry map per y column, keyed by the column's output name.
    pub y_values: Vec<BTreeMap<String, ChartValue>>,
}

impl ChartDataRow {
    /// The y value at `index`, if it is a number.
    pub fn y_value_as_f64(&self, index: usize) -> Option<f64> {
        match self.y_values.get(index)?.values().next()? {
            ChartValue::Number(n) => Some(*n),
            ChartValue::Null | ChartValue::Text(_) => None,
        }
    }
}

/// Turn one result row, as a JSON object in column order, into a chart row.
pub fn materialize(row: serde_json::Value) -> Result<ChartDataRow, QueryError> {
    let serde_json::Value::Object(columns) = row else {
        return Err(QueryError::UnexpectedRow(row));
    };
    if columns.is_empty() {
        return Err(QueryError::UnexpectedRow(serde_json::Value::Object(
            columns,
        )));
    }

    let mut columns = columns.into_iter();
    let x_value = columns
        .next()
        .map_or(ChartValue::Null, |(_, value)| value.into());
    let y_values = columns
        .map(|(name, value)| BTreeMap::from([(name, value.into())]))
        .collect();

    Ok(ChartDataRow { x_value, y_values })
}
