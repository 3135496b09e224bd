//! User-defined types: enums, composites, domains and ranges.

use std::collections::BTreeMap;
use std::fmt;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What a type is, from `pg_type.typtype`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Sequence, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Composite,
    Enum,
    Domain,
    Base,
    Range,
    Pseudo,
    Unknown,
}

impl TypeKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "c" => TypeKind::Composite,
            "e" => TypeKind::Enum,
            "d" => TypeKind::Domain,
            "b" => TypeKind::Base,
            "r" => TypeKind::Range,
            "p" => TypeKind::Pseudo,
            _ => TypeKind::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Composite => "composite",
            TypeKind::Enum => "enum",
            TypeKind::Domain => "domain",
            TypeKind::Base => "base",
            TypeKind::Range => "range",
            TypeKind::Pseudo => "pseudo",
            TypeKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The name of a `pg_type.typcategory` code.
pub fn type_category_name(code: &str) -> &'static str {
    match code {
        "A" => "Array",
        "B" => "Boolean",
        "C" => "Composite",
        "D" => "Date/time",
        "E" => "Enum",
        "G" => "Geometric",
        "I" => "Network address",
        "N" => "Numeric",
        "P" => "Pseudo",
        "R" => "Range",
        "S" => "String",
        "T" => "Timespan",
        "U" => "User-defined",
        "V" => "Bit-string",
        "X" => "Unknown",
        _ => "Other",
    }
}

/// A type defined in the schema. Table row types are not included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CustomType {
    pub schema_name: String,
    pub type_name: String,
    pub kind: TypeKind,
    pub category: String,
    pub owner: String,
    pub description: Option<String>,
}

/// One label of an enum type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumValue {
    pub label: String,
    pub sort_order: f64,
}

/// One attribute of a composite type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompositeTypeAttribute {
    pub name: String,
    pub data_type: String,
    pub position: i32,
    pub is_nullable: bool,
    pub default_value: Option<String>,
}

/// A domain over a base type, with its CHECK constraint if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DomainInfo {
    pub schema_name: String,
    pub domain_name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub default_value: Option<String>,
    pub check_clause: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RangeInfo {
    pub schema_name: String,
    pub type_name: String,
    pub subtype: String,
    pub owner: String,
    pub description: Option<String>,
}

/// Enum labels by type name, in sort order.
pub type EnumTypes = BTreeMap<String, Vec<EnumValue>>;

/// Composite attributes by type name, in position order.
pub type CompositeTypes = BTreeMap<String, Vec<CompositeTypeAttribute>>;

/// Every custom type of a schema, with the details of each kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CustomTypeDetails {
    pub all_types: Vec<CustomType>,
    pub enum_types: EnumTypes,
    pub composite_types: CompositeTypes,
    pub domain_types: Vec<DomainInfo>,
    pub range_types: Vec<RangeInfo>,
}

impl CustomTypeDetails {
    pub fn of_kind(&self, kind: TypeKind) -> impl Iterator<Item = &CustomType> {
        self.all_types.iter().filter(move |t| t.kind == kind)
    }
}
