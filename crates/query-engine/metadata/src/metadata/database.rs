//! Tables and columns.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The tables of a schema, in name order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct DatabaseSchema {
    pub schema_name: String,
    pub tables: Vec<TableInfo>,
}

impl DatabaseSchema {
    pub fn table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.iter().find(|table| table.name == name)
    }
}

/// Information about a database table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableInfo {
    pub name: String,
    /// In ordinal position order.
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    pub fn primary_key(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|column| column.is_primary_key)
    }
}

/// Can this column contain null values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Nullable {
    #[default]
    Nullable,
    NonNullable,
}

impl Nullable {
    /// Read the `YES`/`NO` that `information_schema` uses.
    pub fn from_yes_no(value: &str) -> Self {
        if value.eq_ignore_ascii_case("NO") {
            Nullable::NonNullable
        } else {
            Nullable::Nullable
        }
    }
}

/// Information about a database column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub nullable: Nullable,
    pub default_value: Option<String>,
    pub max_length: Option<i32>,
    /// 1-based.
    pub position: i32,
    #[serde(default)]
    pub is_primary_key: bool,
    /// Empty when the column has no comment.
    #[serde(default)]
    pub comment: String,
}
