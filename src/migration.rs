//! Create the schema and tables for all entities. Tables first, then foreign keys, so the
//! doctor <-> hospital cycle can be expressed.

use crate::entity::{tables, TableDef, ID_COLUMN};
use crate::error::StoreError;
use crate::sql::{qualified_table, quoted};
use sqlx::PgPool;

/// Name PostgreSQL gives an inline UNIQUE constraint.
pub fn unique_constraint_name(table: &str, column: &str) -> String {
    format!("{}_{}_key", table, column)
}

pub fn foreign_key_name(table: &str, column: &str) -> String {
    format!("fk_{}_{}", table, column)
}

/// CREATE TABLE IF NOT EXISTS with serial id, NOT NULL and inline UNIQUE constraints.
pub fn create_table_sql(schema: &str, table: &TableDef) -> String {
    let mut col_defs = vec![format!("{} SERIAL PRIMARY KEY", quoted(ID_COLUMN))];
    for c in table.columns {
        let mut def = format!("{} {}", quoted(c.name), c.ty.ddl());
        if !c.nullable {
            def.push_str(" NOT NULL");
        }
        if c.unique {
            def.push_str(" UNIQUE");
        }
        col_defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        qualified_table(schema, table.name),
        col_defs.join(",\n  ")
    )
}

/// One ALTER TABLE ... ADD CONSTRAINT per reference column.
pub fn foreign_key_sql(schema: &str, table: &TableDef) -> Vec<String> {
    table
        .columns
        .iter()
        .filter_map(|c| c.references.map(|target| (c, target)))
        .map(|(c, target)| {
            format!(
                "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) ON UPDATE NO ACTION ON DELETE NO ACTION",
                qualified_table(schema, table.name),
                quoted(&foreign_key_name(table.name, c.name)),
                quoted(c.name),
                qualified_table(schema, target),
                quoted(ID_COLUMN)
            )
        })
        .collect()
}

/// Idempotent: schema and tables use IF NOT EXISTS; a foreign key that already exists fails and is skipped.
pub async fn ensure_schema(pool: &PgPool, schema: &str) -> Result<(), StoreError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;

    for t in tables() {
        sqlx::query(&create_table_sql(schema, t)).execute(pool).await?;
    }

    for t in tables() {
        for sql in foreign_key_sql(schema, t) {
            if let Err(e) = sqlx::query(&sql).execute(pool).await {
                tracing::debug!(table = t.name, error = %e, "foreign key not added");
            }
        }
    }

    tracing::info!(schema = %schema, "schema ensured");
    Ok(())
}
