//! Read tables, columns and user-defined types from the Postgres catalogs.
//!
//! Every query aggregates its result into a single JSON value, which is then
//! deserialized into the metadata records.

use std::collections::BTreeMap;

use query_engine_metadata::metadata;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sqlx::Row;
use tracing::{info_span, Instrument};

use crate::error::{Error, QueryError};
use crate::metrics;

/// Run `SELECT coalesce(json_agg(<row>), '[]') FROM (<inner>) ...` and deserialize the result.
async fn fetch_json<T: DeserializeOwned>(
    pool: &sqlx::PgPool,
    what: &'static str,
    inner: &str,
    binds: &[&str],
) -> Result<Vec<T>, Error> {
    let sql = format!(
        "SELECT coalesce(json_agg(\"introspection\"), '[]'::json) FROM ({inner}) AS \"introspection\""
    );
    let query = binds
        .iter()
        .fold(sqlx::query(&sql), |query, value| query.bind(*value));

    let row = query.fetch_one(pool).await?;
    let value: serde_json::Value = row.try_get(0)?;
    serde_json::from_value(value)
        .map_err(|source| Error::Query(QueryError::UnexpectedIntrospectionResult { what, source }))
}

#[derive(Deserialize)]
struct TableRow {
    table_name: String,
}

/// The names of the tables in a schema, in order.
pub async fn list_tables(pool: &sqlx::PgPool, schema: &str) -> Result<Vec<String>, Error> {
    let rows: Vec<TableRow> = fetch_json(
        pool,
        "tables",
        "SELECT tablename::text AS table_name
         FROM pg_catalog.pg_tables
         WHERE schemaname = $1
         ORDER BY tablename",
        &[schema],
    )
    .await?;
    Ok(rows.into_iter().map(|row| row.table_name).collect())
}

#[derive(Deserialize)]
struct ColumnRow {
    column_name: String,
    data_type: String,
    is_nullable: String,
    column_default: Option<String>,
    character_maximum_length: Option<i32>,
    ordinal_position: i32,
    is_primary_key: bool,
    column_comment: String,
}

impl From<ColumnRow> for metadata::ColumnInfo {
    fn from(row: ColumnRow) -> Self {
        metadata::ColumnInfo {
            name: row.column_name,
            data_type: row.data_type,
            nullable: metadata::Nullable::from_yes_no(&row.is_nullable),
            default_value: row.column_default,
            max_length: row.character_maximum_length,
            position: row.ordinal_position,
            is_primary_key: row.is_primary_key,
            comment: row.column_comment,
        }
    }
}

/// The columns of a table, in ordinal position order.
pub async fn column_info(
    pool: &sqlx::PgPool,
    schema: &str,
    table: &str,
) -> Result<Vec<metadata::ColumnInfo>, Error> {
    let rows: Vec<ColumnRow> = fetch_json(
        pool,
        "columns",
        "SELECT
            c.column_name::text AS column_name,
            c.data_type::text AS data_type,
            c.is_nullable::text AS is_nullable,
            c.column_default::text AS column_default,
            c.character_maximum_length::int AS character_maximum_length,
            c.ordinal_position::int AS ordinal_position,
            pk.column_name IS NOT NULL AS is_primary_key,
            coalesce(pgd.description, '') AS column_comment
         FROM information_schema.columns c
         LEFT JOIN (
            SELECT ku.column_name
            FROM information_schema.table_constraints tc
            JOIN information_schema.key_column_usage ku
              ON tc.constraint_name = ku.constraint_name
             AND tc.table_schema = ku.table_schema
            WHERE tc.constraint_type = 'PRIMARY KEY'
              AND tc.table_name = $2
              AND tc.table_schema = $1
         ) pk ON c.column_name = pk.column_name
         LEFT JOIN pg_catalog.pg_statio_all_tables st
           ON c.table_name = st.relname AND c.table_schema = st.schemaname
         LEFT JOIN pg_catalog.pg_description pgd
           ON pgd.objoid = st.relid AND pgd.objsubid = c.ordinal_position
         WHERE c.table_schema = $1 AND c.table_name = $2
         ORDER BY c.ordinal_position",
        &[schema, table],
    )
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Every table of a schema with its columns.
pub async fn describe_schema(
    pool: &sqlx::PgPool,
    metrics: &metrics::Metrics,
    schema: &str,
) -> Result<metadata::DatabaseSchema, Error> {
    async {
        let mut tables = vec![];
        for name in list_tables(pool, schema).await? {
            let columns = column_info(pool, schema, &name).await?;
            tables.push(metadata::TableInfo { name, columns });
        }
        metrics.introspection_total.inc();
        Ok(metadata::DatabaseSchema {
            schema_name: schema.to_string(),
            tables,
        })
    }
    .instrument(info_span!("Describe schema", schema))
    .await
}

#[derive(Deserialize)]
struct CustomTypeRow {
    schema_name: String,
    type_name: String,
    type_code: String,
    category_code: String,
    owner: String,
    description: Option<String>,
}

impl From<CustomTypeRow> for metadata::CustomType {
    fn from(row: CustomTypeRow) -> Self {
        metadata::CustomType {
            schema_name: row.schema_name,
            type_name: row.type_name,
            kind: metadata::TypeKind::from_code(&row.type_code),
            category: metadata::type_category_name(&row.category_code).to_string(),
            owner: row.owner,
            description: row.description,
        }
    }
}

/// Composite, enum, domain, base and range types defined in a schema, excluding table row types.
pub async fn custom_types(
    pool: &sqlx::PgPool,
    schema: &str,
) -> Result<Vec<metadata::CustomType>, Error> {
    let rows: Vec<CustomTypeRow> = fetch_json(
        pool,
        "custom types",
        "SELECT
            n.nspname::text AS schema_name,
            t.typname::text AS type_name,
            t.typtype::text AS type_code,
            t.typcategory::text AS category_code,
            pg_get_userbyid(t.typowner)::text AS owner,
            obj_description(t.oid, 'pg_type') AS description
         FROM pg_catalog.pg_type t
         JOIN pg_catalog.pg_namespace n ON t.typnamespace = n.oid
         WHERE n.nspname = $1
           AND t.typtype IN ('c', 'e', 'd', 'b', 'r')
           AND NOT EXISTS (
             SELECT 1 FROM pg_catalog.pg_class c
             WHERE c.reltype = t.oid AND c.relkind <> 'c'
           )
           AND NOT EXISTS (
             SELECT 1 FROM pg_catalog.pg_type elem
             WHERE elem.typarray = t.oid
           )
         ORDER BY t.typname",
        &[schema],
    )
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Group rows that each name their type, keeping their order within a type.
fn group_by_type<T>(rows: impl IntoIterator<Item = (String, T)>) -> BTreeMap<String, Vec<T>> {
    let mut grouped: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for (type_name, value) in rows {
        grouped.entry(type_name).or_default().push(value);
    }
    grouped
}

#[derive(Deserialize)]
struct EnumValueRow {
    type_name: String,
    #[serde(flatten)]
    value: metadata::EnumValue,
}

/// The labels of every enum type, in sort order.
pub async fn enum_types(pool: &sqlx::PgPool, schema: &str) -> Result<metadata::EnumTypes, Error> {
    let rows: Vec<EnumValueRow> = fetch_json(
        pool,
        "enum types",
        "SELECT
            t.typname::text AS type_name,
            e.enumlabel::text AS label,
            e.enumsortorder::float8 AS sort_order
         FROM pg_catalog.pg_type t
         JOIN pg_catalog.pg_namespace n ON t.typnamespace = n.oid
         JOIN pg_catalog.pg_enum e ON t.oid = e.enumtypid
         WHERE n.nspname = $1 AND t.typtype = 'e'
         ORDER BY t.typname, e.enumsortorder",
        &[schema],
    )
    .await?;
    Ok(group_by_type(
        rows.into_iter().map(|row| (row.type_name, row.value)),
    ))
}

#[derive(Deserialize)]
struct CompositeAttributeRow {
    type_name: String,
    #[serde(flatten)]
    attribute: metadata::CompositeTypeAttribute,
}

/// The attributes of every standalone composite type, in position order.
pub async fn composite_types(
    pool: &sqlx::PgPool,
    schema: &str,
) -> Result<metadata::CompositeTypes, Error> {
    let rows: Vec<CompositeAttributeRow> = fetch_json(
        pool,
        "composite types",
        "SELECT
            t.typname::text AS type_name,
            a.attname::text AS name,
            format_type(a.atttypid, a.atttypmod) AS data_type,
            a.attnum::int AS position,
            NOT a.attnotnull AS is_nullable,
            pg_get_expr(ad.adbin, ad.adrelid) AS default_value
         FROM pg_catalog.pg_type t
         JOIN pg_catalog.pg_namespace n ON t.typnamespace = n.oid
         JOIN pg_catalog.pg_class c ON c.reltype = t.oid AND c.relkind = 'c'
         JOIN pg_catalog.pg_attribute a ON a.attrelid = c.oid
         LEFT JOIN pg_catalog.pg_attrdef ad ON ad.adrelid = c.oid AND ad.adnum = a.attnum
         WHERE n.nspname = $1
           AND t.typtype = 'c'
           AND a.attnum > 0
           AND NOT a.attisdropped
         ORDER BY t.typname, a.attnum",
        &[schema],
    )
    .await?;
    Ok(group_by_type(
        rows.into_iter().map(|row| (row.type_name, row.attribute)),
    ))
}

/// Domain types with their base type. A domain with several CHECK constraints is
/// described once, its constraints joined with AND in name order.
pub async fn domain_types(
    pool: &sqlx::PgPool,
    schema: &str,
) -> Result<Vec<metadata::DomainInfo>, Error> {
    fetch_json(
        pool,
        "domain types",
        "SELECT
            n.nspname::text AS schema_name,
            t.typname::text AS domain_name,
            format_type(t.typbasetype, t.typtypmod) AS data_type,
            NOT t.typnotnull AS is_nullable,
            t.typdefault AS default_value,
            (SELECT string_agg(pg_get_constraintdef(cc.oid), ' AND ' ORDER BY cc.conname)
               FROM pg_catalog.pg_constraint cc
              WHERE cc.contypid = t.oid AND cc.contype = 'c') AS check_clause,
            obj_description(t.oid, 'pg_type') AS description
         FROM pg_catalog.pg_type t
         JOIN pg_catalog.pg_namespace n ON t.typnamespace = n.oid
         WHERE n.nspname = $1 AND t.typtype = 'd'
         ORDER BY t.typname",
        &[schema],
    )
    .await
}

/// Range types with their subtype.
pub async fn range_types(
    pool: &sqlx::PgPool,
    schema: &str,
) -> Result<Vec<metadata::RangeInfo>, Error> {
    fetch_json(
        pool,
        "range types",
        "SELECT
            n.nspname::text AS schema_name,
            t.typname::text AS type_name,
            format_type(r.rngsubtype, NULL) AS subtype,
            pg_get_userbyid(t.typowner)::text AS owner,
            obj_description(t.oid, 'pg_type') AS description
         FROM pg_catalog.pg_type t
         JOIN pg_catalog.pg_namespace n ON t.typnamespace = n.oid
         JOIN pg_catalog.pg_range r ON r.rngtypid = t.oid
         WHERE n.nspname = $1 AND t.typtype = 'r'
         ORDER BY t.typname",
        &[schema],
    )
    .await
}

/// Every custom type of a schema together with the details of each kind.
pub async fn custom_types_with_details(
    pool: &sqlx::PgPool,
    metrics: &metrics::Metrics,
    schema: &str,
) -> Result<metadata::CustomTypeDetails, Error> {
    async {
        let details = metadata::CustomTypeDetails {
            all_types: custom_types(pool, schema)
                .await
                .map_err(Error::getting_types("custom"))?,
            enum_types: enum_types(pool, schema)
                .await
                .map_err(Error::getting_types("enum"))?,
            composite_types: composite_types(pool, schema)
                .await
                .map_err(Error::getting_types("composite"))?,
            domain_types: domain_types(pool, schema)
                .await
                .map_err(Error::getting_types("domain"))?,
            range_types: range_types(pool, schema)
                .await
                .map_err(Error::getting_types("range"))?,
        };
        metrics.introspection_total.inc();
        Ok(details)
    }
    .instrument(info_span!("Introspect custom types", schema))
    .await
}

/// The tables and custom types of a schema.
pub async fn introspect(
    pool: &sqlx::PgPool,
    metrics: &metrics::Metrics,
    schema: &str,
) -> Result<metadata::Metadata, Error> {
    Ok(metadata::Metadata {
        schema: describe_schema(pool, metrics, schema).await?,
        custom_types: custom_types_with_details(pool, metrics, schema).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn groups_keep_row_order() {
        let grouped = group_by_type([
            ("mood".to_string(), "sad"),
            ("colour".to_string(), "red"),
            ("mood".to_string(), "ok"),
            ("mood".to_string(), "happy"),
        ]);
        assert_eq!(
            grouped,
            BTreeMap::from([
                ("colour".to_string(), vec!["red"]),
                ("mood".to_string(), vec!["sad", "ok", "happy"]),
            ])
        );
    }

    #[test]
    fn reads_aggregated_rows() {
        let rows: Vec<EnumValueRow> = serde_json::from_value(serde_json::json!([
            {"type_name": "mood", "label": "sad", "sort_order": 1.0},
            {"type_name": "mood", "label": "ok", "sort_order": 2.0}
        ]))
        .unwrap();
        let grouped = group_by_type(rows.into_iter().map(|row| (row.type_name, row.value)));
        assert_eq!(grouped["mood"][1].label, "ok");

        let column: metadata::ColumnInfo = serde_json::from_value::<ColumnRow>(serde_json::json!({
            "column_name": "id",
            "data_type": "integer",
            "is_nullable": "NO",
            "column_default": null,
            "character_maximum_length": null,
            "ordinal_position": 1,
            "is_primary_key": true,
            "column_comment": ""
        }))
        .unwrap()
        .into();
        assert_eq!(column.nullable, metadata::Nullable::NonNullable);
        assert!(column.is_primary_key);
    }

    #[test]
    fn type_errors_name_the_kind() {
        let source = Error::Query(QueryError::UnexpectedRow(serde_json::Value::Null));
        let error = Error::getting_types("enum")(source);
        assert_eq!(
            error.to_string(),
            "error getting enum types: expected a non-empty JSON object per row, got: null"
        );
    }
}
