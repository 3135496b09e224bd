//! Metadata information regarding the database, as read from its catalogs.

pub mod database;
pub mod types;

// re-export without modules
pub use database::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use types::*;

/// Everything introspection reports about one schema.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    pub schema: DatabaseSchema,
    pub custom_types: CustomTypeDetails,
}
