//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for one table definition.

use crate::entity::{TableDef, ID_COLUMN};
use crate::store::Row;
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: names only come from table definitions and validated config).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub(crate) fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// `id` followed by every column in definition order.
fn select_column_list(table: &TableDef) -> String {
    std::iter::once(ID_COLUMN)
        .chain(table.columns.iter().map(|c| c.name))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row ORDER BY id.
pub fn select_all(schema: &str, table: &TableDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(table),
        qualified_table(schema, table.name),
        quoted(ID_COLUMN)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(schema: &str, table: &TableDef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Value::from(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(table),
        qualified_table(schema, table.name),
        quoted(ID_COLUMN),
        n
    );
    q
}

/// INSERT every column (absent values bind NULL); `id` comes from the serial default.
/// Placeholders carry the column cast so text-bound dates bind correctly.
pub fn insert(schema: &str, table: &TableDef, row: &Row) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(table.columns.len());
    let mut placeholders = Vec::with_capacity(table.columns.len());
    for c in table.columns {
        let val = row.get(c.name).cloned().unwrap_or(Value::Null);
        let n = q.push_param(val);
        cols.push(quoted(c.name));
        placeholders.push(format!("${}::{}", n, c.ty.cast()));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        qualified_table(schema, table.name),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(table)
    );
    q
}

/// UPDATE by id: SET only the table's columns present in `row`. With nothing to set, selects the row instead.
pub fn update(schema: &str, table: &TableDef, id: i32, row: &Row) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in table.columns {
        let Some(v) = row.get(c.name) else { continue };
        let n = q.push_param(v.clone());
        sets.push(format!("{} = ${}::{}", quoted(c.name), n, c.ty.cast()));
    }
    if sets.is_empty() {
        return select_by_id(schema, table, id);
    }
    let id_param = q.push_param(Value::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        qualified_table(schema, table.name),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_param,
        select_column_list(table)
    );
    q
}

/// DELETE by id, returning the removed row.
pub fn delete(schema: &str, table: &TableDef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Value::from(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        qualified_table(schema, table.name),
        quoted(ID_COLUMN),
        n,
        select_column_list(table)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{doctor_history, visit};
    use serde_json::json;

    fn row(v: Value) -> Row {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn select_all_orders_by_id() {
        let q = select_all("hospital", &visit::TABLE);
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"doctor_id\", \"patient_id\", \"visit_date\", \"reason\", \"notes\" \
             FROM \"hospital\".\"visit\" ORDER BY \"id\""
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn insert_binds_every_column_with_casts() {
        let q = insert(
            "hospital",
            &visit::TABLE,
            &row(json!({"doctor_id": 1, "patient_id": 2, "visit_date": "2024-01-31", "reason": "checkup"})),
        );
        assert!(q.sql.starts_with("INSERT INTO \"hospital\".\"visit\" (\"doctor_id\", \"patient_id\", \"visit_date\", \"reason\", \"notes\")"));
        assert!(q.sql.contains("VALUES ($1::int4, $2::int4, $3::date, $4::varchar, $5::varchar)"));
        assert!(q.sql.ends_with("RETURNING \"id\", \"doctor_id\", \"patient_id\", \"visit_date\", \"reason\", \"notes\""));
        assert_eq!(q.params, vec![json!(1), json!(2), json!("2024-01-31"), json!("checkup"), Value::Null]);
    }

    #[test]
    fn update_sets_only_present_columns() {
        let q = update("hospital", &visit::TABLE, 7, &row(json!({"reason": "follow-up", "bogus": 1})));
        assert_eq!(
            q.sql,
            "UPDATE \"hospital\".\"visit\" SET \"reason\" = $1::varchar WHERE \"id\" = $2 \
             RETURNING \"id\", \"doctor_id\", \"patient_id\", \"visit_date\", \"reason\", \"notes\""
        );
        assert_eq!(q.params, vec![json!("follow-up"), json!(7)]);
    }

    #[test]
    fn empty_update_falls_back_to_select() {
        let q = update("hospital", &doctor_history::TABLE, 3, &Row::new());
        assert!(q.sql.starts_with("SELECT "));
        assert!(q.sql.ends_with("WHERE \"id\" = $1"));
        assert_eq!(q.params, vec![json!(3)]);
    }

    #[test]
    fn delete_returns_row() {
        let q = delete("public", &doctor_history::TABLE, 9);
        assert!(q.sql.starts_with("DELETE FROM \"public\".\"doctor_history\" WHERE \"id\" = $1 RETURNING \"id\""));
        assert_eq!(q.params, vec![json!(9)]);
    }

    #[test]
    fn quotes_embedded_quotes() {
        assert_eq!(quoted("a\"b"), "\"a\"\"b\"");
    }
}
